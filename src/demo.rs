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

use crate::{set::WordSet, words::WordEntry};

struct DemoSet {
    title: &'static str,
    description: &'static str,
    words: &'static [(&'static str, &'static str)],
}

const DEMO_SETS: [DemoSet; 4] = [
    DemoSet {
        title: "Korean Basics 🇰🇷",
        description: "Essential Korean vocabulary for beginners",
        words: &[
            ("사과", "apple"),
            ("오렌지", "orange"),
            ("공부하다", "to study"),
            ("학교", "school"),
            ("선생님", "teacher"),
            ("학생", "student"),
            ("책", "book"),
            ("물", "water"),
            ("밥", "rice/meal"),
            ("집", "house/home"),
            ("친구", "friend"),
            ("가족", "family"),
        ],
    },
    DemoSet {
        title: "GRE Vocabulary 📚",
        description: "Advanced English vocabulary for GRE preparation",
        words: &[
            ("Ubiquitous", "present, appearing, or found everywhere"),
            ("Ephemeral", "lasting for a very short time"),
            ("Pragmatic", "dealing with things sensibly and realistically"),
            ("Enigmatic", "difficult to interpret or understand; mysterious"),
            ("Pedantic", "excessively concerned with minor details"),
            ("Perfunctory", "carried out with minimum effort; cursory"),
            ("Sycophant", "a person who acts obsequiously to gain advantage"),
            (
                "Anachronism",
                "a thing belonging to a period other than that in which it exists",
            ),
            ("Laconic", "using very few words"),
            ("Mellifluous", "sweet or musical; pleasant to hear"),
        ],
    },
    DemoSet {
        title: "JLPT N5 🇯🇵",
        description: "Japanese vocabulary for JLPT N5 level",
        words: &[
            ("食べる (たべる)", "to eat"),
            ("飲む (のむ)", "to drink"),
            ("行く (いく)", "to go"),
            ("来る (くる)", "to come"),
            ("見る (みる)", "to see/watch"),
            ("聞く (きく)", "to hear/listen/ask"),
            ("話す (はなす)", "to speak"),
            ("読む (よむ)", "to read"),
            ("書く (かく)", "to write"),
            ("分かる (わかる)", "to understand"),
            ("大きい (おおきい)", "big, large"),
            ("小さい (ちいさい)", "small, little"),
        ],
    },
    DemoSet {
        title: "Spanish Essentials 🇪🇸",
        description: "Common Spanish words and phrases",
        words: &[
            ("Hola", "Hello"),
            ("Gracias", "Thank you"),
            ("Por favor", "Please"),
            ("Buenos días", "Good morning"),
            ("Buenas noches", "Good night"),
            ("Adiós", "Goodbye"),
            ("Sí", "Yes"),
            ("No", "No"),
            ("¿Cómo estás?", "How are you?"),
            ("Muy bien", "Very well"),
        ],
    },
];

///Starter sets for an empty store. Every call hands out fresh set and word ids.
pub fn demo_sets(now: i64) -> Vec<WordSet> {
    DEMO_SETS
        .iter()
        .map(|demo| {
            let words = demo
                .words
                .iter()
                .map(|(term, definition)| WordEntry::new(*term, *definition))
                .collect();
            WordSet::new(demo.title, Some(demo.description.to_owned()), words, now)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use hashbrown::HashSet;

    use crate::stats::PracticeMode;

    use super::demo_sets;

    #[test]
    fn demo_sets_are_practicable() {
        let sets = demo_sets(42);
        assert_eq!(sets.len(), 4);

        for set in &sets {
            assert_eq!(set.created_at, 42);
            assert_eq!(set.stats.total_practices, 0);
            assert!(PracticeMode::ALL
                .iter()
                .all(|mode| set.words.len() >= mode.min_words()));
        }
    }

    #[test]
    fn ids_are_fresh_each_call() {
        let ids = demo_sets(0)
            .into_iter()
            .chain(demo_sets(0))
            .flat_map(|set| std::iter::once(set.id).chain(set.words.into_iter().map(|w| w.id)))
            .collect::<Vec<_>>();
        let unique = ids.iter().collect::<HashSet<_>>();
        assert_eq!(unique.len(), ids.len());
    }
}
