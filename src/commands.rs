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

use std::{io::Write, path::Path};

use crate::{
    cli::Command,
    modes::mcq::McqVariant,
    practice,
    repository::Repository,
    set::WordSet,
    stats::{format_last_practiced, format_seconds, Overview, PracticeMode, SetStats},
    store::Store,
    words::{entries_to_text, parse_words},
    FlashsetsError, PracticeOptions,
};

pub(crate) fn execute<S: Store>(
    repo: &mut Repository<S>,
    command: Command,
    out: &mut impl Write,
) -> Result<(), FlashsetsError> {
    match command {
        Command::List => list(repo, out),
        Command::Show { id, plain: false } => {
            let set = find_set(repo, &id)?;
            show(&set, repo.now(), out)
        }
        Command::Show { id, plain: true } => {
            let set = find_set(repo, &id)?;
            writeln!(out, "{}", entries_to_text(&set.words))?;
            Ok(())
        }
        Command::Create {
            title,
            description,
            words,
        } => {
            let words = parse_words(&read_input(&words)?);
            let set = WordSet::create(&title, description.as_deref(), words, repo.now())?;
            repo.save(set.clone())?;

            writeln!(
                out,
                "Created \"{}\" ({}) with {} words",
                set.title,
                set.id,
                set.words.len()
            )?;
            Ok(())
        }
        Command::Edit {
            id,
            title,
            description,
            words,
        } => {
            let mut set = find_set(repo, &id)?;
            let title = title.unwrap_or_else(|| set.title.clone());
            let description = description.or_else(|| set.description.clone());
            let words = match words {
                Some(path) => parse_words(&read_input(&path)?),
                None => set.words.clone(),
            };

            set.apply_edit(&title, description.as_deref(), words)?;
            repo.save(set.clone())?;

            writeln!(out, "Updated \"{}\"", set.title)?;
            Ok(())
        }
        Command::Pause { id, word_id } => set_paused(repo, &id, &word_id, true, out),
        Command::Resume { id, word_id } => set_paused(repo, &id, &word_id, false, out),
        Command::Rename { id, title } => {
            let set = find_set(repo, &id)?;
            repo.rename(&set.id, &title)?;

            writeln!(out, "Renamed \"{}\" to \"{title}\"", set.title)?;
            Ok(())
        }
        Command::Delete { id } => {
            let set = find_set(repo, &id)?;
            repo.delete(&set.id)?;

            writeln!(out, "Deleted \"{}\"", set.title)?;
            Ok(())
        }
        Command::Export { output } => {
            let json = repo.export_all()?;
            match output {
                Some(path) => {
                    std::fs::write(&path, json)
                        .map_err(|err| FlashsetsError::Write(path.clone(), err))?;
                    log::info!("Exported sets to {}", path.display());
                    writeln!(out, "Exported {} set(s) to {}", repo.list().len(), path.display())?;
                }
                None => writeln!(out, "{json}")?,
            }
            Ok(())
        }
        Command::Import { file } => {
            let report = repo.import_merge(&read_input(&file)?);
            if !report.success {
                return Err(FlashsetsError::Import(report.message));
            }

            writeln!(out, "{}", report.message)?;
            if report.inserted != report.imported {
                writeln!(
                    out,
                    "{} already stored, {} added",
                    report.imported - report.inserted,
                    report.inserted
                )?;
            }
            Ok(())
        }
        Command::Stats { id: Some(id) } => {
            let set = find_set(repo, &id)?;
            writeln!(out, "{}", set.title)?;
            write_stats(&set.stats, repo.now(), out)
        }
        Command::Stats { id: None } => overview(repo, out),
        Command::Demo => {
            let count = repo.seed_demo_sets()?;
            writeln!(out, "Added {count} demo sets")?;
            Ok(())
        }
        Command::Clear { yes: false } => {
            writeln!(out, "Refusing to remove every set without --yes")?;
            Ok(())
        }
        Command::Clear { yes: true } => {
            let count = repo.list().len();
            repo.clear_all()?;
            log::info!("Cleared {count} sets");

            writeln!(out, "Removed {count} set(s)")?;
            Ok(())
        }
        Command::Practice {
            id,
            mode,
            infinite,
            retry_missed,
            definition_first,
            shuffle,
        } => {
            let set = find_set(repo, &id)?;
            let options = PracticeOptions {
                mode,
                variant: match (infinite, retry_missed) {
                    (true, _) => McqVariant::Infinite,
                    (_, true) => McqVariant::RetryMissed,
                    _ => McqVariant::Standard,
                },
                definition_first,
                shuffle,
            };
            check_enough_words(&set, mode)?;

            log::info!("Practicing \"{}\" in {mode} mode", set.title);
            match practice(set.words.clone(), options)? {
                Some(outcome) => {
                    repo.record(&set.id, &outcome)?;
                    writeln!(out, "{outcome}")?;
                }
                None => writeln!(out, "Practice ended early, nothing recorded")?,
            }
            Ok(())
        }
    }
}

///Matches an exact id first, then a unique id prefix.
fn find_set<S: Store>(repo: &Repository<S>, id: &str) -> Result<WordSet, FlashsetsError> {
    if let Some(set) = repo.get(id) {
        return Ok(set);
    }

    let mut matches = repo
        .list()
        .into_iter()
        .filter(|set| !id.is_empty() && set.id.starts_with(id));

    match (matches.next(), matches.next()) {
        (Some(set), None) => Ok(set),
        _ => Err(FlashsetsError::NotFound(id.to_owned())),
    }
}

fn check_enough_words(set: &WordSet, mode: PracticeMode) -> Result<(), FlashsetsError> {
    let has = match mode {
        PracticeMode::Matching => set.active_words().count(),
        _ => set.words.len(),
    };

    if has < mode.min_words() {
        return Err(FlashsetsError::NotEnoughWords {
            title: set.title.clone(),
            mode,
            needed: mode.min_words(),
            has,
        });
    }
    Ok(())
}

fn read_input(path: &str) -> Result<String, FlashsetsError> {
    if path == "-" {
        return std::io::read_to_string(std::io::stdin())
            .map_err(|err| FlashsetsError::Read("stdin".into(), err));
    }

    let path = Path::new(path);
    std::fs::read_to_string(path).map_err(|err| FlashsetsError::Read(path.to_owned(), err))
}

fn set_paused<S: Store>(
    repo: &mut Repository<S>,
    id: &str,
    word_id: &str,
    paused: bool,
    out: &mut impl Write,
) -> Result<(), FlashsetsError> {
    let mut set = find_set(repo, id)?;
    set.set_paused(word_id, paused)?;
    repo.save(set)?;

    writeln!(
        out,
        "{} {word_id}",
        if paused { "Paused" } else { "Resumed" }
    )?;
    Ok(())
}

fn list<S: Store>(repo: &Repository<S>, out: &mut impl Write) -> Result<(), FlashsetsError> {
    let sets = repo.list();
    if sets.is_empty() {
        writeln!(
            out,
            "No sets yet. Create one with `flashsets create`, or add the demo sets with `flashsets demo`"
        )?;
        return Ok(());
    }

    let now = repo.now();
    for set in sets {
        writeln!(
            out,
            "{}  {}  ({} words, last practiced: {})",
            set.id,
            set.title,
            set.words.len(),
            format_last_practiced(set.stats.last_practiced, now)
        )?;
    }
    Ok(())
}

fn show(set: &WordSet, now: i64, out: &mut impl Write) -> Result<(), FlashsetsError> {
    writeln!(out, "{} ({})", set.title, set.id)?;
    if let Some(description) = set.description.as_ref() {
        writeln!(out, "{description}")?;
    }
    writeln!(out)?;

    for (index, word) in set.words.iter().enumerate() {
        writeln!(
            out,
            "{:>3}. {word}{}  [{}]",
            index + 1,
            if word.paused { " (paused)" } else { "" },
            word.id
        )?;
    }
    writeln!(out)?;

    write_stats(&set.stats, now, out)
}

fn write_stats(stats: &SetStats, now: i64, out: &mut impl Write) -> Result<(), FlashsetsError> {
    writeln!(
        out,
        "Practiced {} time(s), last: {}",
        stats.total_practices,
        format_last_practiced(stats.last_practiced, now)
    )?;
    writeln!(out, "Flashcard accuracy: {}%", stats.flashcard_accuracy)?;
    writeln!(out, "Multiple choice accuracy: {}%", stats.mcq_accuracy)?;
    writeln!(
        out,
        "Matching best time: {}",
        stats
            .matching_best_time
            .map(format_seconds)
            .unwrap_or_else(|| "-".to_owned())
    )?;
    writeln!(out, "Speed match high score: {}", stats.speed_match_high_score)?;
    writeln!(out, "Typing best: {} WPM", stats.typing_best_wpm)?;
    Ok(())
}

fn overview<S: Store>(repo: &Repository<S>, out: &mut impl Write) -> Result<(), FlashsetsError> {
    let sets = repo.list();
    let overview = Overview::from_sets(&sets);
    let now = repo.now();

    writeln!(
        out,
        "{} sets, {} words, {} practice sessions",
        overview.total_sets, overview.total_words, overview.total_practices
    )?;
    writeln!(
        out,
        "Average multiple choice accuracy: {}%",
        overview.average_mcq_accuracy
    )?;
    writeln!(
        out,
        "Average flashcard accuracy: {}%",
        overview.average_flashcard_accuracy
    )?;
    writeln!(out, "Best speed match score: {}", overview.best_speed_match_score)?;
    writeln!(out, "Best typing speed: {} WPM", overview.best_typing_wpm)?;

    if !overview.recently_practiced.is_empty() {
        writeln!(out, "\nRecently practiced:")?;
        for set in overview.recently_practiced {
            writeln!(
                out,
                "  {}  {}",
                set.title,
                format_last_practiced(set.stats.last_practiced, now)
            )?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use crate::{
        cli::Command,
        repository::Repository,
        stats::{PracticeMode, PracticeOutcome},
        store::MemoryStore,
        FlashsetsError,
    };

    use super::execute;

    const NOW: i64 = 1_700_000_000_000;

    fn fixed_now() -> i64 {
        NOW
    }

    fn repo() -> Repository<MemoryStore> {
        Repository::with_clock(MemoryStore::new(), fixed_now)
    }

    fn run(repo: &mut Repository<MemoryStore>, command: Command) -> Result<String, FlashsetsError> {
        let mut out = vec![];
        execute(repo, command, &mut out)?;
        Ok(String::from_utf8_lossy(&out).into_owned())
    }

    fn words_file(text: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().expect("Unable to create temp file");
        file.write_all(text.as_bytes())
            .expect("Unable to write temp file");
        file
    }

    fn create(repo: &mut Repository<MemoryStore>, title: &str, text: &str) -> String {
        let file = words_file(text);
        run(
            repo,
            Command::Create {
                title: title.to_owned(),
                description: None,
                words: file.path().display().to_string(),
            },
        )
        .expect("Unable to create set");
        repo.list()
            .into_iter()
            .find(|set| set.title == title)
            .map(|set| set.id)
            .expect("Created set not stored")
    }

    #[test]
    fn empty_list_suggests_demo() {
        let output = run(&mut repo(), Command::List).expect("Unable to list");
        assert!(output.contains("flashsets demo"));
    }

    #[test]
    fn create_list_and_show() {
        let mut repo = repo();
        let id = create(&mut repo, "Spanish", "hola: hello\nadiós - goodbye\n\n");

        let output = run(&mut repo, Command::List).expect("Unable to list");
        assert!(output.contains("Spanish"));
        assert!(output.contains("2 words"));
        assert!(output.contains("last practiced: Never"));

        //A prefix of the id is enough
        let output = run(
            &mut repo,
            Command::Show {
                id: id[..8].to_owned(),
                plain: false,
            },
        )
        .expect("Unable to show");
        assert!(output.contains("1. hola: hello"));
        assert!(output.contains("2. adiós: goodbye"));

        let output = run(&mut repo, Command::Show { id, plain: true }).expect("Unable to show");
        assert_eq!(output, "hola: hello\nadiós: goodbye\n");
    }

    #[test]
    fn create_rejects_invalid_input() {
        let mut repo = repo();
        let file = words_file("\n\n");
        let result = run(
            &mut repo,
            Command::Create {
                title: " ".to_owned(),
                description: None,
                words: file.path().display().to_string(),
            },
        );

        assert!(result.is_err_and(|err| matches!(err, FlashsetsError::Set(_))));
        assert!(repo.list().is_empty());
    }

    #[test]
    fn edit_keeps_unchanged_fields() {
        let mut repo = repo();
        let id = create(&mut repo, "Old", "a: 1\nb: 2");

        run(
            &mut repo,
            Command::Edit {
                id: id.clone(),
                title: None,
                description: Some("Now described".to_owned()),
                words: None,
            },
        )
        .expect("Unable to edit");

        let set = repo.get(&id).expect("Edited set missing");
        assert_eq!(set.title, "Old");
        assert_eq!(set.description.as_deref(), Some("Now described"));
        assert_eq!(set.words.len(), 2);
        assert_eq!(set.updated_at, NOW);
    }

    #[test]
    fn edit_with_blank_description_removes_it() {
        let mut repo = repo();
        let id = create(&mut repo, "Described", "a: 1");
        let edit = |description: &str| Command::Edit {
            id: id.clone(),
            title: None,
            description: Some(description.to_owned()),
            words: None,
        };

        run(&mut repo, edit("Something")).expect("Unable to edit");
        assert_eq!(
            repo.get(&id).and_then(|set| set.description).as_deref(),
            Some("Something")
        );

        run(&mut repo, edit("")).expect("Unable to edit");
        assert_eq!(repo.get(&id).and_then(|set| set.description), None);
    }

    #[test]
    fn pause_resume_rename_delete() {
        let mut repo = repo();
        let id = create(&mut repo, "Words", "a: 1\nb: 2");
        let word_id = repo.get(&id).map(|set| set.words[0].id.clone()).expect("No words");

        run(
            &mut repo,
            Command::Pause {
                id: id.clone(),
                word_id: word_id.clone(),
            },
        )
        .expect("Unable to pause");
        assert!(repo.get(&id).is_some_and(|set| set.words[0].paused));

        run(
            &mut repo,
            Command::Resume {
                id: id.clone(),
                word_id: word_id.clone(),
            },
        )
        .expect("Unable to resume");
        assert!(repo.get(&id).is_some_and(|set| !set.words[0].paused));

        assert!(run(
            &mut repo,
            Command::Pause {
                id: id.clone(),
                word_id: "missing".to_owned(),
            },
        )
        .is_err());

        run(
            &mut repo,
            Command::Rename {
                id: id.clone(),
                title: "Renamed".to_owned(),
            },
        )
        .expect("Unable to rename");
        assert_eq!(repo.get(&id).map(|set| set.title), Some("Renamed".to_owned()));

        run(&mut repo, Command::Delete { id: id.clone() }).expect("Unable to delete");
        assert!(repo.get(&id).is_none());
        assert!(run(&mut repo, Command::Delete { id })
            .is_err_and(|err| matches!(err, FlashsetsError::NotFound(_))));
    }

    #[test]
    fn clear_needs_confirmation() {
        let mut repo = repo();
        run(&mut repo, Command::Demo).expect("Unable to add demo sets");

        let output = run(&mut repo, Command::Clear { yes: false }).expect("Unable to clear");
        assert!(output.starts_with("Refusing"));
        assert_eq!(repo.list().len(), 4);

        let output = run(&mut repo, Command::Clear { yes: true }).expect("Unable to clear");
        assert_eq!(output, "Removed 4 set(s)\n");
        assert!(repo.list().is_empty());
    }

    #[test]
    fn export_then_import_elsewhere() {
        let mut repo = repo();
        run(&mut repo, Command::Demo).expect("Unable to add demo sets");

        let dir = tempfile::tempdir().expect("Unable to create temp dir");
        let path = dir.path().join("export.json");
        run(
            &mut repo,
            Command::Export {
                output: Some(path.clone()),
            },
        )
        .expect("Unable to export");

        let mut other = self::repo();
        let output = run(
            &mut other,
            Command::Import {
                file: path.display().to_string(),
            },
        )
        .expect("Unable to import");
        assert!(output.starts_with("Imported 4 set(s)"));
        assert_eq!(other.list(), repo.list());

        //Importing again adds nothing but reports the input size
        let output = run(
            &mut other,
            Command::Import {
                file: path.display().to_string(),
            },
        )
        .expect("Unable to import");
        assert!(output.contains("Imported 4 set(s)"));
        assert!(output.contains("4 already stored, 0 added"));
        assert_eq!(other.list().len(), 4);
    }

    #[test]
    fn import_failure_is_an_error() {
        let mut repo = repo();
        let file = words_file("{}");
        let result = run(
            &mut repo,
            Command::Import {
                file: file.path().display().to_string(),
            },
        );
        assert!(result.is_err_and(|err| matches!(err, FlashsetsError::Import(message)
            if message == "Invalid format: expected an array")));
    }

    #[test]
    fn stats_for_set_and_overview() {
        let mut repo = repo();
        let id = create(&mut repo, "Stats", "a: 1\nb: 2\nc: 3\nd: 4");
        let matching = PracticeOutcome::Matching {
            matched: 4,
            total: 4,
            seconds: 75,
        };
        repo.record(&id, &matching).expect("Unable to record outcome");
        repo.record(&id, &PracticeOutcome::SpeedMatch { score: 120 })
            .expect("Unable to record outcome");

        let output =
            run(&mut repo, Command::Stats { id: Some(id) }).expect("Unable to show stats");
        assert!(output.contains("Practiced 2 time(s), last: Today"));
        assert!(output.contains("Matching best time: 1:15"));
        assert!(output.contains("Speed match high score: 120"));

        let output =
            run(&mut repo, Command::Stats { id: None }).expect("Unable to show overview");
        assert!(output.contains("1 sets, 4 words, 2 practice sessions"));
        assert!(output.contains("Recently practiced:\n  Stats  Today"));
    }

    #[test]
    fn practice_checks_word_count_before_starting() {
        let mut repo = repo();
        let id = create(&mut repo, "Tiny", "a: 1\nb: 2\nc: 3\nd: 4");
        let word_id = repo.get(&id).map(|set| set.words[0].id.clone()).expect("No words");
        run(
            &mut repo,
            Command::Pause {
                id: id.clone(),
                word_id,
            },
        )
        .expect("Unable to pause");

        //Paused words don't count toward matching
        let result = run(
            &mut repo,
            Command::Practice {
                id: id.clone(),
                mode: PracticeMode::Matching,
                infinite: false,
                retry_missed: false,
                definition_first: false,
                shuffle: false,
            },
        );
        assert!(result.is_err_and(|err| matches!(err,
            FlashsetsError::NotEnoughWords { needed: 4, has: 3, .. })));

        let result = run(
            &mut repo,
            Command::Practice {
                id: "nope".to_owned(),
                mode: PracticeMode::Mcq,
                infinite: false,
                retry_missed: false,
                definition_first: false,
                shuffle: false,
            },
        );
        assert!(result.is_err_and(|err| matches!(err, FlashsetsError::NotFound(_))));
    }
}
