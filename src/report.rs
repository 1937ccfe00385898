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

//! Human readable and JSON status reports

use serde::Serialize;

use ow_core::constants::report::RULE_WIDTH;
use ow_core::display::{property_line, sensor_line};
use ow_core::{Engine, FamilyCatalog, Registry, SensorNetworkClient, SensorRecord};

#[derive(Serialize)]
struct Snapshot<'a> {
    connected: bool,
    registry: &'a Registry,
}

fn header<C: SensorNetworkClient>(engine: &Engine<C>) -> String {
    if engine.is_connected() {
        format!(
            "Connected to {}, {} Registered Sensors",
            engine.address(),
            engine.sensors().len()
        )
    } else {
        "Not connected.".to_string()
    }
}

/// Sensor line followed by its properties sorted by name
pub fn render_sensor(sensor: &SensorRecord) -> String {
    let mut out = sensor_line(sensor);
    for property in sensor.properties() {
        out.push('\n');
        out.push_str(&property_line(property));
    }
    out
}

/// Full status report, sensors sorted by id
pub fn render_status<C: SensorNetworkClient>(engine: &Engine<C>) -> String {
    let mut out = header(engine);
    if engine.is_connected() {
        out.push('\n');
        out.push_str(&"-".repeat(RULE_WIDTH));
        for sensor in engine.sensors() {
            out.push('\n');
            out.push_str(&render_sensor(sensor));
        }
    }
    out.push('\n');
    out
}

pub fn render_json<C: SensorNetworkClient>(engine: &Engine<C>) -> serde_json::Result<String> {
    serde_json::to_string_pretty(&Snapshot {
        connected: engine.is_connected(),
        registry: engine.registry(),
    })
}

/// One line per known family, sorted by code
pub fn render_families(catalog: &FamilyCatalog) -> String {
    let mut out = String::new();
    for family in catalog.families() {
        out.push_str(&family.to_string());
        out.push('\n');
    }
    out
}
