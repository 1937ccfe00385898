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

use clap::Parser;
use tracing::debug;

use owneo::cli::{run_cli, Cli};
use owneo::logger::init_logging;

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    debug!("owneo {} starting", env!("CARGO_PKG_VERSION"));

    if let Err(e) = run_cli(&cli) {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}
