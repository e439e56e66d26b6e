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

use flashsets::FlashsetsError;

fn main() {
    env_logger::init();

    if let Err(err) = flashsets::run() {
        match &err {
            FlashsetsError::NotEnoughWords { .. } | FlashsetsError::NotFound(_) => {
                eprintln!("{err}")
            }
            FlashsetsError::Panic(_) => {
                log::error!("Practice session panicked");
                eprintln!("{err}");
            }
            _ => eprintln!("Error: {err}"),
        }
        std::process::exit(1);
    }
}
