/*
 * This file is part of owneo.
 *
 * Copyright (C) 2025 owneo contributors
 *
 * owneo is free software: you can redistribute it and/or modify
 * it under the terms of the GNU General Public License as published by
 * the Free Software Foundation, either version 3 of the License, or
 * (at your option) any later version.
 *
 * owneo is distributed in the hope that it will be useful,
 * but WITHOUT ANY WARRANTY; without even the implied warranty of
 * MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the
 * GNU General Public License for more details.
 *
 * You should have received a copy of the GNU General Public License
 * along with owneo. If not, see <https://www.gnu.org/licenses/>.
 */

//! owneo - 1-Wire sensor tracking over owfs
//!
//! Command line frontend over `ow-core`: configuration, logging setup and
//! status reports.

pub mod cli;
pub mod config;
pub mod logger;
pub mod report;
