pub const BUCKET_VAR: &str = "QSET_BUCKET";
pub const LIST_PAGE_SIZE_VAR: &str = "QSET_LIST_PAGE_SIZE";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuntimeConfig {
    pub bucket: String,
    /// `MaxKeys` for listing calls; the store default when unset.
    pub list_page_size: Option<i32>,
}

impl RuntimeConfig {
    pub fn from_env() -> Result<Self, String> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, String> {
        let bucket = lookup(BUCKET_VAR)
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty())
            .ok_or_else(|| format!("{BUCKET_VAR} must be configured"))?;

        let list_page_size = match lookup(LIST_PAGE_SIZE_VAR) {
            None => None,
            Some(raw) => match raw.trim().parse::<i32>() {
                Ok(value) if value > 0 => Some(value),
                _ => {
                    return Err(format!(
                        "{LIST_PAGE_SIZE_VAR} must be a positive integer, got '{raw}'"
                    ))
                }
            },
        };

        Ok(Self {
            bucket,
            list_page_size,
        })
    }
}
