use std::future::Future;

use aws_sdk_s3::primitives::ByteStream;
use qset_core::store::{ListPage, ObjectStore, StoreError};

/// [`ObjectStore`] over one S3 bucket.
///
/// Calls block the current worker thread, so this must be used from inside a
/// multi-threaded Tokio runtime.
pub struct S3ObjectStore {
    bucket: String,
    s3_client: aws_sdk_s3::Client,
    page_size: Option<i32>,
}

impl S3ObjectStore {
    pub fn new(bucket: impl Into<String>, s3_client: aws_sdk_s3::Client) -> Self {
        Self {
            bucket: bucket.into(),
            s3_client,
            page_size: None,
        }
    }

    /// Caps the number of keys requested per listing call (`MaxKeys`).
    pub fn with_page_size(mut self, page_size: Option<i32>) -> Self {
        self.page_size = page_size;
        self
    }
}

impl ObjectStore for S3ObjectStore {
    fn get_object(&self, key: &str) -> Result<Vec<u8>, StoreError> {
        let bucket = self.bucket.clone();
        let object_key = key.to_string();
        let client = self.s3_client.clone();

        block_on(async move {
            let output = match client
                .get_object()
                .bucket(bucket)
                .key(&object_key)
                .send()
                .await
            {
                Ok(output) => output,
                Err(error) => {
                    let missing = error
                        .as_service_error()
                        .map(|service_error| service_error.is_no_such_key())
                        .unwrap_or(false);
                    return Err(if missing {
                        StoreError::NotFound { key: object_key }
                    } else {
                        StoreError::Unavailable(format!(
                            "failed to read object from s3: {error}"
                        ))
                    });
                }
            };

            output
                .body
                .collect()
                .await
                .map(|data| data.into_bytes().to_vec())
                .map_err(|error| {
                    StoreError::Unavailable(format!("failed to read object body from s3: {error}"))
                })
        })
    }

    fn put_object(&self, key: &str, body: &[u8]) -> Result<(), StoreError> {
        let bucket = self.bucket.clone();
        let object_key = key.to_string();
        let body_bytes = body.to_vec();
        let client = self.s3_client.clone();

        block_on(async move {
            client
                .put_object()
                .bucket(bucket)
                .key(object_key)
                .content_type("application/json")
                .body(ByteStream::from(body_bytes))
                .send()
                .await
                .map(|_| ())
                .map_err(|error| {
                    StoreError::Unavailable(format!("failed to write object to s3: {error}"))
                })
        })
    }

    fn list_page(
        &self,
        prefix: &str,
        continuation_token: Option<&str>,
    ) -> Result<ListPage, StoreError> {
        let bucket = self.bucket.clone();
        let prefix = prefix.to_string();
        let continuation_token = continuation_token.map(str::to_string);
        let page_size = self.page_size;
        let client = self.s3_client.clone();

        block_on(async move {
            let output = client
                .list_objects_v2()
                .bucket(bucket)
                .prefix(prefix)
                .set_continuation_token(continuation_token)
                .set_max_keys(page_size)
                .send()
                .await
                .map_err(|error| {
                    StoreError::Unavailable(format!("failed to list objects in s3: {error}"))
                })?;

            Ok(ListPage {
                keys: output
                    .contents()
                    .iter()
                    .filter_map(|object| object.key().map(str::to_string))
                    .collect(),
                next_continuation_token: output.next_continuation_token().map(str::to_string),
            })
        })
    }
}

fn block_on<F: Future>(future: F) -> F::Output {
    tokio::task::block_in_place(|| tokio::runtime::Handle::current().block_on(future))
}
