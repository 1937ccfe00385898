/*
 * Integration tests for owneo
 *
 * These tests drive full refresh cycles through the engine, over both the
 * in-memory bus and a fake owfs mount on disk.
 */

use std::fs;
use std::path::Path;

use ow_core::{
    parse_features, Engine, FeatureClassifier, FeatureSet, MemoryBus, OwError, PropertyStatus,
    PropertyValue, RawProperties, SensorStatus,
};
use owneo::config::{load_config_from, Config};
use owneo::report::{render_json, render_status};
use tempfile::TempDir;

// Test utilities
fn features(names: &[&str]) -> FeatureSet {
    parse_features(names).unwrap()
}

fn ds18s20() -> RawProperties {
    RawProperties::from_pairs([
        ("id", "10.147A0A020800"),
        ("family", "10"),
        ("type", "DS18S20"),
        ("temperature", "37.2"),
    ])
}

fn weather_bus() -> MemoryBus {
    let bus = MemoryBus::new("memory");
    bus.add_device(
        "/10.147A0A020800/",
        [("id", "10.147A0A020800"), ("family", "10"), ("type", "DS18S20"), ("temperature", "37.2")],
    );
    bus.add_device(
        "/26.000000000001/",
        [
            ("id", "26.000000000001"),
            ("family", "26"),
            ("type", "DS2438"),
            ("temperature", "21.5"),
            ("HIH4000/humidity", "40.1"),
            ("VAD", "4.9"),
        ],
    );
    bus.add_device("/01.FFFFFFFFFFFF/", [("id", "01.FFFFFFFFFFFF"), ("family", "01")]);
    bus
}

fn fake_mount(root: &Path) {
    let thermo = root.join("10.147A0A020800");
    fs::create_dir_all(&thermo).unwrap();
    fs::write(thermo.join("id"), "10.147A0A020800").unwrap();
    fs::write(thermo.join("type"), "DS18S20").unwrap();
    fs::write(thermo.join("temperature"), "     37.2").unwrap();

    let battery = root.join("26.000000000001");
    fs::create_dir_all(battery.join("HIH4000")).unwrap();
    fs::write(battery.join("id"), "26.000000000001").unwrap();
    fs::write(battery.join("temperature"), "21.5").unwrap();
    fs::write(battery.join("HIH4000/humidity"), "40.1").unwrap();

    fs::create_dir_all(root.join("01.FFFFFFFFFFFF")).unwrap();
    fs::write(root.join("01.FFFFFFFFFFFF/id"), "01.FFFFFFFFFFFF").unwrap();

    fs::create_dir_all(root.join("bus.0")).unwrap();
    fs::create_dir_all(root.join("uncached")).unwrap();
}

#[test]
fn test_selection_scenarios() {
    let classifier = FeatureClassifier::builtin().unwrap();

    let selected = classifier.select_attributes(&ds18s20(), &features(&["temperature"]));
    let names: Vec<_> = selected.keys().map(String::as_str).collect();
    assert_eq!(names, vec!["family", "id", "temperature", "type"]);

    let selected = classifier.select_attributes(&ds18s20(), &features(&["current"]));
    let names: Vec<_> = selected.keys().map(String::as_str).collect();
    assert_eq!(names, vec!["family", "id", "type"]);

    let desired = classifier.desired_sensors(["01.AAAA", "10.BBBB", "43.CCCC"], &features(&["temperature"]));
    assert_eq!(desired.into_iter().collect::<Vec<_>>(), vec!["10.BBBB"]);
}

#[test]
fn test_feature_selection_is_superset_of_identity() {
    let classifier = FeatureClassifier::builtin().unwrap();
    let identity = classifier.select_attributes(&ds18s20(), &FeatureSet::new());
    for feature in ow_core::Feature::ALL {
        let with_feature = classifier.select_attributes(&ds18s20(), &[feature].into_iter().collect());
        assert!(identity.keys().all(|k| with_feature.contains_key(k)), "{}", feature);
    }
}

#[test]
fn test_full_cycle_over_memory_bus() {
    let bus = weather_bus();
    let mut engine = Engine::with_client(bus.clone(), features(&["temperature", "humidity"])).unwrap();

    let ids: Vec<_> = engine.sensors().iter().map(|s| s.id().to_string()).collect();
    assert_eq!(ids, vec!["10.147A0A020800", "26.000000000001"]);
    assert!(engine.sensors().iter().all(|s| s.status() == SensorStatus::New));

    let battery = engine.sensor("/26.000000000001/").unwrap();
    let names: Vec<_> = battery.properties().map(|p| p.name()).collect();
    assert_eq!(names, vec!["HIH4000/humidity", "family", "id", "temperature", "type"]);

    bus.set_value("/10.147A0A020800/temperature", "38.0");
    bus.set_value("/26.000000000001/HIH4000/humidity", "39.5");
    let summary = engine.refresh().unwrap();
    assert_eq!(summary.added, 0);
    assert_eq!(summary.changed_properties, 2);

    let thermo = engine.sensor("10.147A0A020800").unwrap();
    assert_eq!(thermo.status(), SensorStatus::Available);
    assert_eq!(thermo.property("temperature").unwrap().status(), PropertyStatus::Increased);
    assert_eq!(thermo.property("type").unwrap().status(), PropertyStatus::Stable);
    let battery = engine.sensor("26.000000000001").unwrap();
    assert_eq!(
        battery.property("HIH4000/humidity").unwrap().status(),
        PropertyStatus::Decreased
    );
}

#[test]
fn test_sensor_missing_then_returning() {
    let bus = weather_bus();
    let mut engine = Engine::with_client(bus.clone(), features(&["temperature"])).unwrap();

    bus.remove_device("/10.147A0A020800/");
    let summary = engine.refresh().unwrap();
    assert_eq!(summary.missing, 1);
    let thermo = engine.sensor("10.147A0A020800").unwrap();
    assert_eq!(thermo.status(), SensorStatus::Missing);
    assert_eq!(
        thermo.property("temperature").unwrap().value(),
        Some(&PropertyValue::Numeric(37.2))
    );

    bus.add_device(
        "/10.147A0A020800/",
        [("id", "10.147A0A020800"), ("family", "10"), ("type", "DS18S20"), ("temperature", "37.2")],
    );
    let summary = engine.refresh().unwrap();
    assert_eq!(summary.returned, 1);
    let thermo = engine.sensor("10.147A0A020800").unwrap();
    assert_eq!(thermo.status(), SensorStatus::Available);
    assert_eq!(thermo.property("temperature").unwrap().status(), PropertyStatus::Stable);
}

#[test]
fn test_property_missing_then_returning() {
    let bus = weather_bus();
    let mut engine = Engine::with_client(bus.clone(), features(&["humidity"])).unwrap();

    bus.remove_property("/26.000000000001/HIH4000/humidity");
    engine.refresh().unwrap();
    let humidity = engine.sensor("26.000000000001").unwrap().property("HIH4000/humidity").unwrap();
    assert_eq!(humidity.status(), PropertyStatus::Missing);
    assert_eq!(humidity.value(), Some(&PropertyValue::Numeric(40.1)));

    bus.set_value("/26.000000000001/HIH4000/humidity", "45.0");
    engine.refresh().unwrap();
    let humidity = engine.sensor("26.000000000001").unwrap().property("HIH4000/humidity").unwrap();
    assert_eq!(humidity.status(), PropertyStatus::Increased);
}

#[test]
fn test_binary_memory_rendered_as_hex() {
    let bus = MemoryBus::new("memory");
    bus.add_device("/04.000000000042/", [("id", "04.000000000042")]);
    bus.set_value("/04.000000000042/memory", vec![0xDE_u8, 0xAD, 0xBE, 0xEF]);
    let engine = Engine::with_client(bus, features(&["memory"])).unwrap();

    let memory = engine.sensor("04.000000000042").unwrap().property("memory").unwrap();
    assert_eq!(memory.value(), Some(&PropertyValue::Bytes(vec![0xDE, 0xAD, 0xBE, 0xEF])));
    assert!(render_status(&engine).contains("  n memory = DEADBEEF"));

    let json: serde_json::Value = serde_json::from_str(&render_json(&engine).unwrap()).unwrap();
    assert_eq!(
        json["registry"]["sensors"]["/04.000000000042/"]["properties"]["memory"]["value"],
        "DEADBEEF"
    );
}

#[test]
fn test_owfs_memory_pages_keep_whitespace_bytes() {
    let dir = TempDir::new().unwrap();
    let eeprom = dir.path().join("04.000000000042");
    fs::create_dir_all(eeprom.join("pages")).unwrap();
    fs::write(eeprom.join("id"), "04.000000000042").unwrap();
    fs::write(eeprom.join("pages/page.0"), [0x20, 0x20, 0x41, 0x42, 0x0A]).unwrap();
    fs::write(eeprom.join("memory"), [0x20; 8]).unwrap();

    let mut engine = Engine::connect(dir.path().to_str().unwrap(), features(&["memory"])).unwrap();
    let sensor = engine.sensor("04.000000000042").unwrap();
    assert_eq!(
        sensor.property("pages/page.0").unwrap().value(),
        Some(&PropertyValue::Bytes(vec![0x20, 0x20, 0x41, 0x42, 0x0A]))
    );
    assert_eq!(
        sensor.property("memory").unwrap().value(),
        Some(&PropertyValue::Bytes(vec![0x20; 8]))
    );
    assert!(render_status(&engine).contains("pages/page.0 = 202041420A"));

    engine.refresh().unwrap();
    let sensor = engine.sensor("04.000000000042").unwrap();
    assert_eq!(sensor.property("pages/page.0").unwrap().status(), PropertyStatus::Stable);
    assert_eq!(sensor.property("memory").unwrap().status(), PropertyStatus::Stable);

    fs::write(eeprom.join("pages/page.0"), "AB").unwrap();
    let summary = engine.refresh().unwrap();
    assert_eq!(summary.changed_properties, 1);
    let page = engine.sensor("04.000000000042").unwrap().property("pages/page.0").unwrap();
    assert_eq!(page.status(), PropertyStatus::Changed);
    assert_eq!(page.value(), Some(&PropertyValue::Bytes(b"AB".to_vec())));
}

#[test]
fn test_owfs_mount_end_to_end() {
    let dir = TempDir::new().unwrap();
    fake_mount(dir.path());
    let address = dir.path().to_str().unwrap();

    let mut engine = Engine::connect(address, features(&["temperature", "humidity"])).unwrap();
    assert!(engine.is_connected());
    assert_eq!(engine.sensors().len(), 2);

    let thermo = engine.sensor("10.147A0A020800").unwrap();
    assert_eq!(thermo.description(), "High Precision Digital Thermometer");
    assert_eq!(
        thermo.property("temperature").unwrap().value(),
        Some(&PropertyValue::Numeric(37.2))
    );
    let humidity = engine.sensor("26.000000000001").unwrap().property("HIH4000/humidity").unwrap();
    assert_eq!(humidity.full_path(), "/26.000000000001/HIH4000/humidity");

    fs::write(dir.path().join("10.147A0A020800/temperature"), "36.0").unwrap();
    fs::remove_dir_all(dir.path().join("26.000000000001")).unwrap();
    let summary = engine.refresh().unwrap();
    assert_eq!(summary.missing, 1);
    assert_eq!(
        engine.sensor("10.147A0A020800").unwrap().property("temperature").unwrap().status(),
        PropertyStatus::Decreased
    );

    let report = render_status(&engine);
    assert!(report.starts_with(&format!("Connected to {}, 2 Registered Sensors\n", address)));
    assert!(report.contains("26.000000000001\tSmart Battery Monitor\tMissing\t"));
}

#[test]
fn test_owfs_write_round_trip() {
    let dir = TempDir::new().unwrap();
    fake_mount(dir.path());
    let mut engine = Engine::connect(dir.path().to_str().unwrap(), features(&["temperature"])).unwrap();

    engine.write_property("10.147A0A020800", "temperature", "12.5").unwrap();
    let on_disk = fs::read_to_string(dir.path().join("10.147A0A020800/temperature")).unwrap();
    assert_eq!(on_disk, "12.5");

    engine.refresh().unwrap();
    let temperature = engine.sensor("10.147A0A020800").unwrap().property("temperature").unwrap();
    assert_eq!(temperature.status(), PropertyStatus::Decreased);
    assert_eq!(temperature.value(), Some(&PropertyValue::Numeric(12.5)));

    assert!(matches!(
        engine.write_property("10.147A0A020800", "humidity", "1"),
        Err(OwError::PropertyNotFound { .. })
    ));
}

#[test]
fn test_config_drives_engine() {
    let dir = TempDir::new().unwrap();
    let mount = dir.path().join("owfs");
    fake_mount(&mount);
    let config_file = dir.path().join("config.json");
    fs::write(
        &config_file,
        format!(r#"{{"address": "{}", "features": ["Humidity"]}}"#, mount.display()),
    )
    .unwrap();

    let config: Config = load_config_from(&config_file).unwrap();
    let engine = Engine::connect(&config.address, config.desired_features().unwrap()).unwrap();
    let ids: Vec<_> = engine.sensors().iter().map(|s| s.id().to_string()).collect();
    assert_eq!(ids, vec!["26.000000000001"]);
}

#[test]
fn test_unknown_family_never_desired() {
    let bus = MemoryBus::new("memory");
    bus.add_device("/E0.000000000001/", [("id", "E0.000000000001"), ("temperature", "1")]);
    bus.add_device("/nodot/", [("id", "nodot"), ("temperature", "1")]);
    let engine = Engine::with_client(bus, features(&["temperature"])).unwrap();
    assert!(engine.sensors().is_empty());
}
