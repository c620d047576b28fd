use std::collections::HashSet;

use serde::de::DeserializeOwned;
use tracing::{debug, info, instrument};

use crate::error::{QSetError, Result};
use crate::listing::{json_key_suffixes, list_unpaged};
use crate::model::{AnswerSubmission, Card, QSet};
use crate::storage_keys::{
    answer_object_key, answers_prefix, card_object_key, cards_prefix, meta_object_key,
    set_name_from_meta_key, META_PREFIX,
};
use crate::store::ObjectStore;

/// Reads and writes question sets, cards and answers through an injected store.
pub struct QSetRepository<'a> {
    store: &'a dyn ObjectStore,
}

impl<'a> QSetRepository<'a> {
    pub fn new(store: &'a dyn ObjectStore) -> Self {
        Self { store }
    }

    /// Names of all sets with a metadata record, in listing order.
    #[instrument(skip(self))]
    pub fn list_set_names(&self) -> Result<Vec<String>> {
        let names: Vec<String> = list_unpaged(self.store, META_PREFIX)?
            .iter()
            .map(|key| set_name_from_meta_key(key))
            .filter(|name| !name.is_empty())
            .map(str::to_string)
            .collect();
        debug!(count = names.len(), "listed sets");
        Ok(names)
    }

    #[instrument(skip(self))]
    pub fn load_metadata(&self, name: &str) -> Result<QSet> {
        validate_segment("set name", name)?;
        self.read_json(&meta_object_key(name))
    }

    /// Replaces the metadata record for `qset` wholesale.
    #[instrument(skip(self, qset), fields(set = %qset.name))]
    pub fn save_metadata(&self, qset: &QSet) -> Result<()> {
        validate_segment("set name", &qset.name)?;
        self.write_json(&meta_object_key(&qset.name), qset)
    }

    pub fn list_card_keys<'s>(&'s self, qset: &QSet) -> impl Iterator<Item = Result<String>> + 's {
        json_key_suffixes(self.store, cards_prefix(&qset.name))
    }

    pub fn list_answered_keys<'s>(
        &'s self,
        qset: &QSet,
        user: &str,
    ) -> impl Iterator<Item = Result<String>> + 's {
        json_key_suffixes(self.store, answers_prefix(&qset.name, user))
    }

    /// First card in listing order that `user` has not answered in any round.
    ///
    /// Materializes the answered keys up front, so memory grows with the number
    /// of answers and time with the number of cards. Answers are matched by card
    /// file name, so a card's `name` is assumed to equal its file stem.
    #[instrument(skip(self, qset), fields(set = %qset.name))]
    pub fn next_unanswered(&self, qset: &QSet, user: &str) -> Result<Option<AnswerSubmission>> {
        validate_segment("user", user)?;
        let answered: HashSet<String> = self
            .list_answered_keys(qset, user)
            .collect::<Result<_>>()?;

        for card_key in self.list_card_keys(qset) {
            let card_key = card_key?;
            if !answered.contains(&card_key) {
                debug!(card_key = %card_key, answered = answered.len(), "found unanswered card");
                return self.build_card_payload(qset, &card_key, user).map(Some);
            }
        }

        debug!(answered = answered.len(), "no unanswered card remains");
        Ok(None)
    }

    /// Loads a card and wraps it in a fresh first-round submission shell.
    pub fn build_card_payload(
        &self,
        qset: &QSet,
        card_key: &str,
        user: &str,
    ) -> Result<AnswerSubmission> {
        let card: Card = self.read_json(&card_object_key(&qset.name, card_key))?;
        Ok(AnswerSubmission::issue(card, qset.name.clone(), user))
    }

    /// Writes the submission at its deterministic key, overwriting silently.
    #[instrument(skip(self, submission), fields(set = %submission.s_name, user = %submission.user))]
    pub fn record_answer(&self, submission: &AnswerSubmission) -> Result<String> {
        validate_segment("set name", &submission.s_name)?;
        validate_segment("user", &submission.user)?;
        validate_segment("card name", &submission.qcard.name)?;

        let key = answer_object_key(
            &submission.s_name,
            &submission.user,
            submission.a_round,
            &submission.qcard.name,
        );
        self.write_json(&key, submission)?;
        info!(key = %key, round = submission.a_round, "recorded answer");
        Ok(key)
    }

    fn read_json<T: DeserializeOwned>(&self, key: &str) -> Result<T> {
        let body = self.store.get_object(key)?;
        serde_json::from_slice(&body).map_err(|source| QSetError::MalformedRecord {
            key: key.to_string(),
            source,
        })
    }

    fn write_json<T: serde::Serialize>(&self, key: &str, value: &T) -> Result<()> {
        let body = serde_json::to_vec(value).map_err(|source| QSetError::MalformedRecord {
            key: key.to_string(),
            source,
        })?;
        self.store.put_object(key, &body)?;
        Ok(())
    }
}

fn validate_segment(field: &'static str, value: &str) -> Result<()> {
    if value.is_empty() || value.contains('/') {
        return Err(QSetError::InvalidIdentifier {
            field,
            value: value.to_string(),
        });
    }
    Ok(())
}
