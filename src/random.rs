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

use rand::{seq::SliceRandom, Rng};

///Returns a shuffled copy of `items`. Uses an in-place Fisher-Yates shuffle
///on the copy, so every permutation is equally likely and the input is untouched.
pub fn shuffled<T: Clone, R: Rng + ?Sized>(items: &[T], rng: &mut R) -> Vec<T> {
    let mut items = items.to_vec();
    items.shuffle(rng);
    items
}

///Filters `pool` down to the items not `equals` to anything in `excluded`, then
///returns up to `count` of them in random order. Returns fewer when the pool runs dry.
pub fn pick_random_excluding<T, R>(
    pool: &[T],
    count: usize,
    excluded: &[T],
    equals: impl Fn(&T, &T) -> bool,
    rng: &mut R,
) -> Vec<T>
where
    T: Clone,
    R: Rng + ?Sized,
{
    pool.iter()
        .filter(|item| !excluded.iter().any(|ex| equals(*item, ex)))
        .cloned()
        .collect::<Vec<_>>()
        .iter_shuffled(rng)
        .take(count)
        .collect()
}

pub trait IterShuffled<'rng, R: Rng + ?Sized>
where
    Self: IntoIterator,
{
    fn iter_shuffled(self, rng: &'rng mut R) -> ShuffleIter<'rng, Self::Item, R>;
}

///Lazily yields a random permutation. Useful when only a prefix is needed.
pub struct ShuffleIter<'rng, T, R: Rng + ?Sized> {
    values: Vec<T>,
    rng: &'rng mut R,
}

impl<T, R: Rng + ?Sized> Iterator for ShuffleIter<'_, T, R> {
    type Item = T;

    fn next(&mut self) -> Option<Self::Item> {
        match self.values.len() {
            0 => None,
            1 => Some(self.values.swap_remove(0)),
            r => Some(self.values.swap_remove(self.rng.gen_range(0..r))),
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.values.len(), Some(self.values.len()))
    }
}

impl<'rng, T, R: Rng + ?Sized> IterShuffled<'rng, R> for Vec<T> {
    fn iter_shuffled(self, rng: &'rng mut R) -> ShuffleIter<'rng, Self::Item, R> {
        ShuffleIter { values: self, rng }
    }
}

pub trait GetRandom {
    type Item;

    fn get_random<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<&'_ Self::Item>;
}

impl<T> GetRandom for [T] {
    type Item = T;

    fn get_random<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<&'_ Self::Item> {
        if self.is_empty() {
            return None;
        }
        self.get(rng.gen_range(0..self.len()))
    }
}
