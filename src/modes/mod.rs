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

use rand::Rng;

use crate::{random::pick_random_excluding, words::WordEntry};

pub mod flashcards;
pub mod matching;
pub mod mcq;
pub mod speed_match;
pub mod typing;

mod choice;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Phase {
    #[default]
    Ready,
    Playing,
    Ended,
}

///A prompt term with its shuffled options, exactly one of which is the word's
///definition.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ChoiceQuestion {
    pub word: WordEntry,
    pub options: Vec<String>,
    pub correct_index: usize,
}

impl ChoiceQuestion {
    ///Draws up to `distractors` other definitions from `pool`. Words with the same id or
    ///the same definition text as the answer are never drawn, and no option repeats.
    pub fn generate<R: Rng + ?Sized>(
        word: &WordEntry,
        pool: &[WordEntry],
        distractors: usize,
        rng: &mut R,
    ) -> Self {
        let candidates = pick_random_excluding(
            pool,
            pool.len(),
            std::slice::from_ref(word),
            |a, b| a.id == b.id || a.definition == b.definition,
            rng,
        );

        let mut options = Vec::with_capacity(distractors + 1);
        for candidate in candidates {
            if options.len() == distractors {
                break;
            }
            if !options.contains(&candidate.definition) {
                options.push(candidate.definition);
            }
        }

        let correct_index = rng.gen_range(0..=options.len());
        options.insert(correct_index, word.definition.clone());

        Self {
            word: word.clone(),
            options,
            correct_index,
        }
    }

    pub fn is_correct(&self, index: usize) -> bool {
        index == self.correct_index
    }
}
