/*
 * Copyright (C) 2024 Clownvin <123clownvin@gmail.com>
 *
 * This file is part of Flashsets.
 *
 * Flashsets is free software: you can redistribute it and/or modify
 * it under the terms of the GNU General Public License as published by
 * the Free Software Foundation, either version 3 of the License, or
 * (at your option) any later version.
 *
 * Flashsets is distributed in the hope that it will be useful,
 * but WITHOUT ANY WARRANTY; without even the implied warranty of
 * MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
 * GNU General Public License for more details.
 *
 * You should have received a copy of the GNU General Public License
 * along with Flashsets.  If not, see <http://www.gnu.org/licenses/>.
 */

use hashbrown::HashSet;
use serde_json::Value;

use crate::{
    demo::demo_sets,
    set::WordSet,
    stats::{PracticeMode, PracticeOutcome, SetStats},
    store::{Store, StoreError},
};

///Key the whole collection is kept under.
pub const STORAGE_KEY: &str = "flashcard-sets";

pub fn now_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

///Result of [`Repository::import_merge`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportReport {
    pub success: bool,
    pub message: String,
    ///Number of sets in the input, which is what `message` reports.
    pub imported: usize,
    ///Number of sets that were actually new and got appended.
    pub inserted: usize,
}

impl ImportReport {
    fn failed(message: &str) -> Self {
        Self {
            success: false,
            message: message.to_owned(),
            imported: 0,
            inserted: 0,
        }
    }
}

///Owns all reads and writes of the stored set collection. Every operation loads the
///whole collection, changes it and writes the whole collection back.
pub struct Repository<S> {
    store: S,
    now: fn() -> i64,
}

impl<S: Store> Repository<S> {
    pub fn new(store: S) -> Self {
        Self::with_clock(store, now_millis)
    }

    pub fn with_clock(store: S, now: fn() -> i64) -> Self {
        Self { store, now }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn now(&self) -> i64 {
        (self.now)()
    }

    ///Unreadable or unparseable data is treated as an empty collection, and is
    ///overwritten by the next write.
    pub fn list(&self) -> Vec<WordSet> {
        let json = match self.store.get(STORAGE_KEY) {
            Ok(Some(json)) => json,
            Ok(None) => return vec![],
            Err(err) => {
                log::warn!("Unable to read stored sets, treating as empty: {err}");
                return vec![];
            }
        };

        serde_json::from_str(&json).unwrap_or_else(|err| {
            log::warn!("Stored sets are corrupt, treating as empty: {err}");
            vec![]
        })
    }

    pub fn get(&self, id: &str) -> Option<WordSet> {
        self.list().into_iter().find(|set| set.id == id)
    }

    ///Replaces the set with the same id, stamping `updated_at`, or appends it.
    pub fn save(&mut self, set: WordSet) -> Result<(), StoreError> {
        let mut sets = self.list();

        if let Some(existing) = sets.iter_mut().find(|existing| existing.id == set.id) {
            *existing = WordSet {
                updated_at: self.now(),
                ..set
            };
        } else {
            sets.push(set);
        }

        self.write(&sets)
    }

    pub fn delete(&mut self, id: &str) -> Result<(), StoreError> {
        let mut sets = self.list();
        let len = sets.len();
        sets.retain(|set| set.id != id);

        if sets.len() == len {
            log::debug!("Delete of unknown set {id} ignored");
        }

        self.write(&sets)
    }

    pub fn rename(&mut self, id: &str, title: &str) -> Result<(), StoreError> {
        if let Some(mut set) = self.get(id) {
            set.title = title.to_owned();
            set.updated_at = self.now();
            self.save(set)?;
        }
        Ok(())
    }

    pub fn stats(&self, id: &str) -> Option<SetStats> {
        self.get(id).map(|set| set.stats)
    }

    ///Folds a finished practice session into the set's stats. Unknown ids are ignored.
    pub fn update_stats(
        &mut self,
        id: &str,
        mode: PracticeMode,
        score: u32,
        total_questions: u32,
        time_spent: Option<u64>,
    ) -> Result<(), StoreError> {
        let Some(mut set) = self.get(id) else {
            log::debug!("Stats update for unknown set {id} ignored");
            return Ok(());
        };

        set.stats
            .apply(mode, score, total_questions, time_spent, self.now());
        log::info!("Recorded {mode} session for \"{}\"", set.title);

        self.save(set)
    }

    pub fn record(&mut self, id: &str, outcome: &PracticeOutcome) -> Result<(), StoreError> {
        let (score, total_questions, time_spent) = outcome.as_update();
        self.update_stats(id, outcome.mode(), score, total_questions, time_spent)
    }

    pub fn export_all(&self) -> Result<String, StoreError> {
        Ok(serde_json::to_string_pretty(&self.list())?)
    }

    ///Merges exported sets into the store. Sets whose id is already stored are skipped,
    ///never overwritten. The whole import is rejected if any element is malformed.
    pub fn import_merge(&mut self, json: &str) -> ImportReport {
        let Ok(value) = serde_json::from_str::<Value>(json) else {
            return ImportReport::failed("Failed to parse JSON");
        };

        let Some(elements) = value.as_array() else {
            return ImportReport::failed("Invalid format: expected an array");
        };

        let non_empty_str = |value: &Value, key: &str| {
            value
                .get(key)
                .and_then(Value::as_str)
                .is_some_and(|s| !s.is_empty())
        };

        if !elements.iter().all(|element| {
            non_empty_str(element, "id")
                && non_empty_str(element, "title")
                && element.get("words").is_some_and(Value::is_array)
        }) {
            return ImportReport::failed("Invalid set structure");
        }

        let incoming: Vec<WordSet> = match serde_json::from_value(value) {
            Ok(incoming) => incoming,
            Err(err) => {
                log::warn!("Import rejected: {err}");
                return ImportReport::failed("Invalid set structure");
            }
        };

        let mut sets = self.list();
        let mut existing_ids = sets
            .iter()
            .map(|set| set.id.clone())
            .collect::<HashSet<_>>();

        let imported = incoming.len();
        let mut inserted = 0;

        for set in incoming {
            if existing_ids.insert(set.id.clone()) {
                sets.push(set);
                inserted += 1;
            } else {
                log::debug!("Import skipped existing set {}", set.id);
            }
        }

        if let Err(err) = self.write(&sets) {
            log::error!("Unable to write imported sets: {err}");
            return ImportReport::failed("Failed to save imported sets");
        }

        ImportReport {
            success: true,
            message: format!("Imported {imported} set(s)"),
            imported,
            inserted,
        }
    }

    pub fn clear_all(&mut self) -> Result<(), StoreError> {
        self.store.remove(STORAGE_KEY)
    }

    ///Appends the starter sets, each with a fresh id. Returns how many were added.
    pub fn seed_demo_sets(&mut self) -> Result<usize, StoreError> {
        let demos = demo_sets(self.now());
        let count = demos.len();

        let mut sets = self.list();
        sets.extend(demos);
        self.write(&sets)?;

        Ok(count)
    }

    fn write(&mut self, sets: &[WordSet]) -> Result<(), StoreError> {
        let json = serde_json::to_string(sets)?;
        self.store.set(STORAGE_KEY, &json)
    }
}

#[cfg(test)]
mod tests {
    use crate::{
        set::WordSet,
        stats::{PracticeMode, PracticeOutcome},
        store::{MemoryStore, Store},
        words::parse_words,
    };

    use super::{Repository, STORAGE_KEY};

    const CREATED: i64 = 1_000;
    const NOW: i64 = 2_000;

    fn fixed_now() -> i64 {
        NOW
    }

    fn repo() -> Repository<MemoryStore> {
        Repository::with_clock(MemoryStore::new(), fixed_now)
    }

    fn sample(title: &str) -> WordSet {
        WordSet::new(title, None, parse_words("a: 1\nb: 2\nc: 3\nd: 4"), CREATED)
    }

    #[test]
    fn empty_store_lists_nothing() {
        assert!(repo().list().is_empty());
    }

    #[test]
    fn corrupt_store_lists_nothing() {
        let mut store = MemoryStore::new();
        store
            .set(STORAGE_KEY, "{ not json")
            .expect("Unable to seed store");
        let mut repo = Repository::with_clock(store, fixed_now);
        assert!(repo.list().is_empty());

        //A non-array document is just as unreadable
        let mut store = MemoryStore::new();
        store
            .set(STORAGE_KEY, r#"{"id":"x"}"#)
            .expect("Unable to seed store");
        assert!(Repository::new(store).list().is_empty());

        //First write replaces the unreadable document
        repo.save(sample("Fresh")).expect("Unable to save set");
        assert_eq!(repo.list().len(), 1);
    }

    #[test]
    fn insert_keeps_timestamps() {
        let mut repo = repo();
        let set = sample("Korean");
        repo.save(set.clone()).expect("Unable to save set");

        let loaded = repo.get(&set.id).expect("Unable to find saved set");
        assert_eq!(loaded.title, set.title);
        assert_eq!(loaded.words, set.words);
        assert_eq!(loaded.updated_at, loaded.created_at);
    }

    #[test]
    fn update_replaces_in_place_and_stamps() {
        let mut repo = repo();
        let first = sample("First");
        let second = sample("Second");
        repo.save(first.clone()).expect("Unable to save set");
        repo.save(second.clone()).expect("Unable to save set");

        let mut edited = first.clone();
        edited.title = "Edited".to_owned();
        repo.save(edited).expect("Unable to update set");

        let sets = repo.list();
        assert_eq!(sets.len(), 2);
        assert_eq!(sets[0].title, "Edited");
        assert_eq!(sets[0].updated_at, NOW);
        assert_eq!(sets[0].created_at, CREATED);
        assert_eq!(sets[1].id, second.id);
    }

    #[test]
    fn delete_and_missing_delete() {
        let mut repo = repo();
        let set = sample("Gone");
        repo.save(set.clone()).expect("Unable to save set");

        repo.delete("nope").expect("Unable to delete");
        assert_eq!(repo.list().len(), 1);

        repo.delete(&set.id).expect("Unable to delete");
        assert!(repo.get(&set.id).is_none());
    }

    #[test]
    fn rename_stamps() {
        let mut repo = repo();
        let set = sample("Old");
        repo.save(set.clone()).expect("Unable to save set");
        repo.rename(&set.id, "New").expect("Unable to rename");

        let loaded = repo.get(&set.id).expect("Unable to find renamed set");
        assert_eq!(loaded.title, "New");
        assert_eq!(loaded.updated_at, NOW);

        repo.rename("missing", "Whatever").expect("Unable to rename");
        assert_eq!(repo.list().len(), 1);
    }

    #[test]
    fn stats_running_average_through_store() {
        let mut repo = repo();
        let set = sample("Stats");
        repo.save(set.clone()).expect("Unable to save set");

        repo.update_stats(&set.id, PracticeMode::Flashcard, 8, 10, None)
            .expect("Unable to update stats");
        assert_eq!(repo.stats(&set.id).map(|s| s.flashcard_accuracy), Some(40));

        repo.record(&set.id, &PracticeOutcome::Flashcard { known: 10, total: 10 })
            .expect("Unable to record outcome");
        let stats = repo.stats(&set.id).expect("Unable to find stats");
        assert_eq!(stats.flashcard_accuracy, 70);
        assert_eq!(stats.total_practices, 2);
        assert_eq!(stats.last_practiced, Some(NOW));
    }

    #[test]
    fn high_score_only_increases() {
        let mut repo = repo();
        let set = sample("Speed");
        repo.save(set.clone()).expect("Unable to save set");

        repo.record(&set.id, &PracticeOutcome::SpeedMatch { score: 200 })
            .expect("Unable to record outcome");
        repo.record(&set.id, &PracticeOutcome::SpeedMatch { score: 150 })
            .expect("Unable to record outcome");
        assert_eq!(
            repo.stats(&set.id).map(|s| s.speed_match_high_score),
            Some(200)
        );

        repo.record(&set.id, &PracticeOutcome::SpeedMatch { score: 260 })
            .expect("Unable to record outcome");
        assert_eq!(
            repo.stats(&set.id).map(|s| s.speed_match_high_score),
            Some(260)
        );
    }

    #[test]
    fn typing_and_matching_outcomes() {
        let mut repo = repo();
        let set = sample("Games");
        repo.save(set.clone()).expect("Unable to save set");

        repo.record(&set.id, &PracticeOutcome::Typing { wpm: 22, accuracy: 90 })
            .expect("Unable to record outcome");
        repo.record(
            &set.id,
            &PracticeOutcome::Matching {
                matched: 4,
                total: 4,
                seconds: 19,
            },
        )
        .expect("Unable to record outcome");

        let stats = repo.stats(&set.id).expect("Unable to find stats");
        assert_eq!(stats.typing_best_wpm, 22);
        assert_eq!(stats.matching_best_time, Some(19));
    }

    #[test]
    fn stats_for_missing_set_is_noop() {
        let mut repo = repo();
        repo.save(sample("Only")).expect("Unable to save set");
        let before = repo.list();

        repo.update_stats("missing", PracticeMode::Mcq, 1, 1, None)
            .expect("Unable to update stats");
        assert_eq!(repo.list(), before);
    }

    #[test]
    fn export_is_pretty_and_reimportable() {
        let mut repo = repo();
        repo.save(sample("Export")).expect("Unable to save set");

        let json = repo.export_all().expect("Unable to export");
        assert!(json.contains("\n  "));
        assert!(json.contains("\"createdAt\""));

        let mut other = super::Repository::with_clock(MemoryStore::new(), fixed_now);
        let report = other.import_merge(&json);
        assert!(report.success);
        assert_eq!(other.list(), repo.list());
    }

    #[test]
    fn import_skips_existing_and_counts_input() {
        let mut repo = repo();
        let existing = sample("Existing");
        repo.save(existing.clone()).expect("Unable to save set");

        let mut clash = existing.clone();
        clash.title = "Overwritten?".to_owned();
        let fresh = sample("Fresh");

        let json = serde_json::to_string(&vec![clash, fresh.clone()])
            .expect("Unable to serialize sets");
        let report = repo.import_merge(&json);

        assert!(report.success);
        //Reports the input size rather than what was inserted
        assert_eq!(report.message, "Imported 2 set(s)");
        assert_eq!(report.imported, 2);
        assert_eq!(report.inserted, 1);

        let sets = repo.list();
        assert_eq!(sets.len(), 2);
        assert_eq!(
            repo.get(&existing.id).map(|set| set.title),
            Some("Existing".to_owned())
        );
        assert!(repo.get(&fresh.id).is_some());
    }

    #[test]
    fn import_only_existing_leaves_store_unchanged() {
        let mut repo = repo();
        let existing = sample("Existing");
        repo.save(existing.clone()).expect("Unable to save set");
        let before = repo.list();

        let json = serde_json::to_string(&vec![existing]).expect("Unable to serialize sets");
        let report = repo.import_merge(&json);
        assert!(report.success);
        assert_eq!(report.inserted, 0);
        assert_eq!(repo.list(), before);
    }

    #[test]
    fn import_rejections() {
        let mut repo = repo();
        repo.save(sample("Keep")).expect("Unable to save set");

        let report = repo.import_merge("not json");
        assert!(!report.success);
        assert_eq!(report.message, "Failed to parse JSON");

        let report = repo.import_merge(r#"{"id":"x","title":"T","words":[]}"#);
        assert_eq!(report.message, "Invalid format: expected an array");

        //One bad element rejects the whole import
        let report = repo.import_merge(
            r#"[{"id":"ok","title":"Fine","words":[]},{"id":"","title":"T","words":[]}]"#,
        );
        assert!(!report.success);
        assert_eq!(report.message, "Invalid set structure");

        let report = repo.import_merge(r#"[{"id":"x","title":"T","words":"nope"}]"#);
        assert_eq!(report.message, "Invalid set structure");

        let report = repo.import_merge(r#"[{"id":"x","title":"T","words":[{"term":"a"}]}]"#);
        assert_eq!(report.message, "Invalid set structure");

        assert_eq!(repo.list().len(), 1);
    }

    #[test]
    fn import_keeps_first_of_repeated_id() {
        let mut repo = repo();
        let report = repo.import_merge(
            r#"[
                {"id":"x","title":"First","words":[]},
                {"id":"x","title":"Second","words":[]}
            ]"#,
        );

        assert!(report.success);
        assert_eq!(report.message, "Imported 2 set(s)");
        assert_eq!(report.inserted, 1);
        assert_eq!(
            repo.list().iter().map(|set| set.title.as_str()).collect::<Vec<_>>(),
            vec!["First"]
        );
    }

    #[test]
    fn import_minimal_sets_default_stats() {
        let mut repo = repo();
        let report = repo.import_merge(
            r#"[{"id":"x","title":"T","words":[{"id":"w","term":"a","definition":"b"}]}]"#,
        );
        assert!(report.success);

        let set = repo.get("x").expect("Unable to find imported set");
        assert_eq!(set.stats.total_practices, 0);
        assert_eq!(set.words.len(), 1);
    }

    #[test]
    fn clear_and_seed() {
        let mut repo = repo();
        let count = repo.seed_demo_sets().expect("Unable to seed demo sets");
        assert!(count > 0);
        assert_eq!(repo.list().len(), count);

        repo.clear_all().expect("Unable to clear");
        assert!(repo.list().is_empty());
    }
}
