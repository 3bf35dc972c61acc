//! Integration tests for the SchematicCompiler API

use chrono::{TimeZone, Utc};

use flowsheet::{
    FlowsheetError, Schematic, SchematicCompiler,
    config::AppConfig,
    model::{Equipment, Parameter, PipeConnection, PlanPosition, ProcessModel},
    sink::MemorySink,
};

fn equipment(id: &str, class: &str, x: f32, z: f32) -> Equipment {
    Equipment::new(id, class, PlanPosition::new(x, z))
}

fn pipe(from: &str, to: &str) -> PipeConnection {
    PipeConnection::new(from, "outlet", to, "inlet")
}

/// Counts text elements whose whole content is `content`.
fn text_count(svg: &str, content: &str) -> usize {
    svg.lines().filter(|line| line.trim() == content).count()
}

fn compile(model: &ProcessModel) -> Schematic {
    let at = Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap();
    SchematicCompiler::default()
        .compile_at(model, at)
        .expect("Failed to compile")
        .expect("Model should not be empty")
}

#[test]
fn test_pump_to_tank() {
    let model = ProcessModel::new()
        .with_equipment(equipment("pump", "pump", 0.0, 0.0))
        .with_equipment(equipment("tank", "tank", 2.0, 0.0))
        .with_connection(pipe("pump", "tank"));

    let schematic = compile(&model);
    let svg = schematic.as_str();

    assert!(svg.starts_with(r#"<?xml version="1.0" encoding="UTF-8"?>"#));
    assert_eq!(text_count(svg, "P-1"), 1);
    assert_eq!(text_count(svg, "T-1"), 1);

    // Pump outlet (+30, 0) to tank inlet (-30, 0) at scale 80, offset 70.
    assert_eq!(svg.matches(r#"class="pipe""#).count(), 1);
    assert!(svg.contains(r#"d="M 100 70 L 200 70""#));

    assert!(svg.contains("Equipment: 2"));
    assert!(svg.contains("Connections: 1"));
    assert!(svg.contains("Generated: 2024-03-01 12:00:00 UTC"));

    assert_eq!(schematic.equipment_count(), 2);
    assert_eq!(schematic.connection_count(), 1);
    assert_eq!(schematic.skipped_connections(), 0);
}

#[test]
fn test_tags_follow_input_order() {
    let model = ProcessModel::new()
        .with_equipment(equipment("pumpA", "pump", 0.0, 0.0))
        .with_equipment(equipment("pumpB", "pump", 1.0, 0.0))
        .with_equipment(equipment("valveA", "valve", 2.0, 0.0));

    let tags = compile(&model).tags().clone();
    assert_eq!(tags.get("pumpA").unwrap().to_string(), "P-1");
    assert_eq!(tags.get("pumpB").unwrap().to_string(), "P-2");
    assert_eq!(tags.get("valveA").unwrap().to_string(), "V-1");

    let reversed = ProcessModel::new()
        .with_equipment(equipment("pumpB", "pump", 1.0, 0.0))
        .with_equipment(equipment("pumpA", "pump", 0.0, 0.0))
        .with_equipment(equipment("valveA", "valve", 2.0, 0.0));

    let tags = compile(&reversed).tags().clone();
    assert_eq!(tags.get("pumpB").unwrap().to_string(), "P-1");
    assert_eq!(tags.get("pumpA").unwrap().to_string(), "P-2");
}

#[test]
fn test_dangling_connection_is_dropped() {
    let model = ProcessModel::new()
        .with_equipment(equipment("pump", "pump", 0.0, 0.0))
        .with_equipment(equipment("tank", "tank", 2.0, 0.0))
        .with_connection(pipe("pump", "tank"))
        .with_connection(pipe("pump", "nowhere"));

    let schematic = compile(&model);
    assert_eq!(schematic.as_str().matches(r#"class="pipe""#).count(), 1);
    assert!(schematic.as_str().contains("Connections: 1"));
    assert_eq!(schematic.connection_count(), 1);
    assert_eq!(schematic.skipped_connections(), 1);
}

#[test]
fn test_free_text_is_escaped() {
    let model = ProcessModel::new().with_equipment(
        equipment("mix", "mixer", 0.0, 0.0)
            .with_display_name(r#"A<B & "C""#)
            .with_parameter("note", Parameter::new("Note", "x > 'y'")),
    );
    let config = AppConfig::default().with_title("Plant <1> & Co");

    let schematic = SchematicCompiler::new(config)
        .compile(&model)
        .expect("Failed to compile")
        .expect("Model should not be empty");
    let svg = schematic.as_str();

    assert!(!svg.contains(r#"A<B & "C""#));
    assert!(svg.contains("A&lt;B &amp; &quot;C&quot;"));
    assert!(svg.contains("Note: x &gt; &apos;y&apos;"));
    assert!(svg.contains("Plant &lt;1&gt; &amp; Co"));
    assert!(!svg.contains("Plant <1>"));
}

#[test]
fn test_output_is_deterministic() {
    let model = ProcessModel::new()
        .with_equipment(equipment("p1", "pump", 0.0, 0.0).with_rotation(90.0))
        .with_equipment(equipment("e1", "heat_exchanger", 2.0, 1.0))
        .with_equipment(equipment("c1", "column", 4.0, 0.0))
        .with_connection(pipe("p1", "e1"))
        .with_connection(PipeConnection::new("e1", "outlet", "c1", "feed"));

    let first = compile(&model);
    let second = compile(&model);
    assert_eq!(first.as_str(), second.as_str());

    let later = SchematicCompiler::default()
        .compile_at(&model, Utc.with_ymd_and_hms(2030, 1, 1, 0, 0, 0).unwrap())
        .unwrap()
        .unwrap();
    let strip = |svg: &str| {
        svg.lines()
            .map(|line| match line.find("Generated: ") {
                Some(at) => line[..at].to_string(),
                None => line.to_string(),
            })
            .collect::<Vec<_>>()
            .join("\n")
    };
    assert_ne!(first.as_str(), later.as_str());
    assert_eq!(strip(first.as_str()), strip(later.as_str()));
}

#[test]
fn test_empty_model_has_nothing_to_draw() {
    let result = SchematicCompiler::default().compile(&ProcessModel::new());
    assert!(matches!(result, Ok(None)));
}

#[test]
fn test_document_structure() {
    let model = ProcessModel::new()
        .with_equipment(equipment("p1", "pump", 0.0, 0.0))
        .with_equipment(equipment("v1", "valve", 1.0, 0.0))
        .with_equipment(equipment("t1", "tank", 2.0, 0.0))
        .with_connection(pipe("p1", "v1"))
        .with_connection(pipe("v1", "t1"));

    let schematic = compile(&model);
    let svg = schematic.as_str();

    assert_eq!(svg.matches("<defs>").count(), 1);
    assert_eq!(svg.matches("<marker").count(), 1);
    assert_eq!(svg.matches(r#"class="background""#).count(), 1);
    assert_eq!(svg.matches(r#"class="border""#).count(), 1);
    assert_eq!(svg.matches(r#"class="equipment""#).count(), 3);
    assert_eq!(svg.matches(r#"class="flow-arrow""#).count(), 2);
    assert_eq!(svg.matches(r#"class="title-block""#).count(), 1);

    let size = schematic.canvas_size();
    assert!(size.width() > 0.0 && size.height() > 0.0);
    let view_box = format!(r#"viewBox="0 0 {} {}""#, size.width(), size.height());
    assert!(svg.contains(&view_box), "missing {view_box}");

    let equipment_layer = svg.find(r#"data-layer="equipment""#).unwrap();
    let piping_layer = svg.find(r#"data-layer="piping""#).unwrap();
    let title_layer = svg.find(r#"data-layer="title-block""#).unwrap();
    assert!(equipment_layer < piping_layer && piping_layer < title_layer);
    assert!(svg.trim_end().ends_with("</svg>"));
}

#[test]
fn test_unknown_class_draws_placeholder() {
    let model = ProcessModel::new()
        .with_equipment(equipment("x1", "centrifuge", 0.0, 0.0))
        .with_equipment(equipment("x2", "centrifuge", 1.0, 0.0));

    let schematic = compile(&model);
    assert!(text_count(schematic.as_str(), "?-1") == 1);
    assert!(text_count(schematic.as_str(), "?-2") == 1);
    assert!(schematic.as_str().contains(r#"data-class="centrifuge""#));
}

#[test]
fn test_title_block_grows_canvas_when_crowded() {
    // A single pump fills a canvas smaller than the title block.
    let model = ProcessModel::new().with_equipment(equipment("p1", "pump", 0.0, 0.0));

    let size = compile(&model).canvas_size();
    assert!(size.width() >= 260.0);
    assert!(size.height() > 140.0);
}

#[test]
fn test_invalid_color_is_config_error() {
    let config: AppConfig = toml::from_str(
        r#"
        [style]
        pipe_color = "definitely-not-a-color"
        "#,
    )
    .unwrap();
    let model = ProcessModel::new().with_equipment(equipment("p1", "pump", 0.0, 0.0));

    let result = SchematicCompiler::new(config).compile(&model);
    assert!(matches!(result, Err(FlowsheetError::Config(_))));
}

#[test]
fn test_export_to_sink() {
    let model = ProcessModel::new().with_equipment(equipment("p1", "pump", 0.0, 0.0));
    let schematic = compile(&model);

    let mut sink = MemorySink::new();
    schematic
        .export_to(&mut sink, Some("plant.svg"))
        .expect("Memory sink never fails");

    let (hint, document) = &sink.documents()[0];
    assert_eq!(hint.as_deref(), Some("plant.svg"));
    assert_eq!(document, schematic.as_str());
}

#[test]
fn test_model_from_toml() {
    let model: ProcessModel = toml::from_str(
        r#"
        [[equipment]]
        id = "feed"
        class = "pump"
        position = { x = 0.0, z = 0.0 }

        [[equipment]]
        id = "drum"
        class = "separator"
        position = { x = 3.0, z = 0.0 }
        display_name = "Flash drum"

        [[connections]]
        from_id = "feed"
        to_id = "drum"
        "#,
    )
    .expect("Failed to parse model");

    let svg = compile(&model).into_string();
    assert!(text_count(&svg, "P-1") == 1);
    assert!(text_count(&svg, "D-1") == 1);
    assert!(svg.contains("Flash drum"));
    assert!(svg.contains("Connections: 1"));
}
