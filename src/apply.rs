//! Applying a template to a day

use chrono::{DateTime, Local, Utc};

use crate::error::StoreError;
use crate::mutation::{Mutation, UsageStamp};
use crate::record::{EntryId, Record, TemplateId};
use crate::template::EventTemplate;
use crate::traits::EntryStore;

/// The batch that applies `template` to the day of `date`: a new entry, and a usage stamp for the template.
///
/// Returns the id of the entry this batch creates
pub fn application_batch(template: &EventTemplate, date: DateTime<Local>, now: DateTime<Utc>) -> (EntryId, Vec<Mutation>) {
    let entry = template.instantiate(date, now);
    let entry_id = *entry.id();
    let batch = vec![
        Mutation::Insert(Record::Entry(entry)),
        Mutation::TemplateUsed(*template.id(), UsageStamp::new(now)),
    ];
    (entry_id, batch)
}

/// Create a new entry from a template, and count this usage of the template.
///
/// Both changes are committed in the same batch: observers never see one without the other, and if the store fails to commit, none is applied.
/// Returns the id of the new entry, or `None` in case there is no such template (anymore).
pub fn apply_template<S>(store: &mut S, template_id: &TemplateId, date: DateTime<Local>) -> Result<Option<EntryId>, StoreError>
where
    S: EntryStore + ?Sized,
{
    let (entry_id, batch) = match store.template(template_id) {
        None => {
            log::debug!("Not applying template {}, that does not exist (anymore)", template_id);
            return Ok(None);
        },
        Some(template) => application_batch(template, date, Utc::now()),
    };

    store.commit(batch)?;
    Ok(Some(entry_id))
}
