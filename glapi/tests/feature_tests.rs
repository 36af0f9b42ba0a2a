// SPDX-FileCopyrightText: 2025 Contributors to the glapi project.
// SPDX-License-Identifier: Apache-2.0

//! Feature index and accumulation tests.

mod common;

use glapi::{
    BindingSurface, FeatureBlock, Registry, Request,
    feature::{accumulate, index_features, resolve},
};

fn fixture_blocks(api: &str) -> (Registry, Vec<FeatureBlock>) {
    common::setup_logging();
    let text = common::fixture();
    let document = roxmltree::Document::parse(&text).unwrap();
    let root = document.root_element();
    (Registry::from_root(root).unwrap(), index_features(root, api).unwrap())
}

fn names(blocks: &[glapi::ResolvedFeature]) -> Vec<&str> {
    blocks.iter().map(|feature| feature.name.as_str()).collect()
}

#[test]
fn index_keeps_document_order_for_one_family() {
    let (_, blocks) = fixture_blocks("gl");
    let versions: Vec<&str> = blocks.iter().map(|block| block.version.as_str()).collect();
    assert_eq!(versions, ["1.0", "1.1", "1.2", "1.5", "2.0"]);

    let (_, gles) = fixture_blocks("gles2");
    assert_eq!(gles.len(), 1);
    assert_eq!(gles[0].name, "GL_ES_VERSION_2_0");
}

#[test]
fn index_is_not_cumulative() {
    let (_, blocks) = fixture_blocks("gl");
    assert_eq!(blocks[1].constants, ["GL_VERTEX_ARRAY"]);
    assert_eq!(blocks[1].commands, ["glDrawArrays", "glTexturePointerEXT"]);
}

#[test]
fn index_reads_every_require_and_ignores_remove() {
    let (_, blocks) = fixture_blocks("gl");
    let last = blocks.last().unwrap();
    assert_eq!(last.constants, ["GL_VERTEX_SHADER", "GL_POINT_SPRITE"]);
    assert_eq!(last.commands, ["glCreateShader"]);
}

#[test]
fn feature_without_name_is_fatal() {
    let document =
        roxmltree::Document::parse(r#"<registry><feature api="gl" number="1.0"/></registry>"#)
            .unwrap();
    assert!(index_features(document.root_element(), "gl").is_err());
}

#[test]
fn accumulation_stops_at_requested_version_inclusive() {
    let (registry, blocks) = fixture_blocks("gl");
    for (position, block) in blocks.iter().enumerate() {
        let accumulation = accumulate(&blocks, &registry, &block.version);
        assert!(accumulation.matched);
        let expected: Vec<&str> = blocks[..=position]
            .iter()
            .map(|block| block.name.as_str())
            .collect();
        assert_eq!(names(&accumulation.features), expected);
    }
}

#[test]
fn boundary_miss_accumulates_everything() {
    let (registry, blocks) = fixture_blocks("gl");
    let accumulation = accumulate(&blocks, &registry, "9.9");
    assert!(!accumulation.matched);
    assert_eq!(
        names(&accumulation.features),
        ["GL_VERSION_1_0", "GL_VERSION_1_1", "GL_VERSION_1_2", "GL_VERSION_1_5", "GL_VERSION_2_0"]
    );
}

#[test]
fn unresolved_references_are_dropped_in_order() {
    let (registry, blocks) = fixture_blocks("gl");

    let v1_1 = resolve(&blocks[1], &registry);
    assert!(v1_1.constants.is_empty());
    let commands: Vec<&str> = v1_1.commands.iter().map(|command| command.name.as_str()).collect();
    assert_eq!(commands, ["glDrawArrays"]);

    let v1_0 = resolve(&blocks[0], &registry);
    let constants: Vec<&str> = v1_0
        .constants
        .iter()
        .map(|constant| constant.name.as_str())
        .collect();
    assert_eq!(
        constants,
        [
            "GL_DEPTH_BUFFER_BIT",
            "GL_STENCIL_BUFFER_BIT",
            "GL_COLOR_BUFFER_BIT",
            "GL_FALSE",
            "GL_TRUE",
            "GL_TRIANGLES",
            "GL_VENDOR",
        ]
    );
}

#[test]
fn order_follows_references_not_table() {
    let xml = r#"<registry>
      <enums>
        <enum name="A" value="0x1"/><enum name="B" value="0x2"/><enum name="C" value="0x3"/>
      </enums>
      <feature api="gl" name="GL_VERSION_1_0" number="1.0">
        <require><enum name="C"/><enum name="MISSING"/><enum name="A"/></require>
        <require><enum name="B"/></require>
      </feature>
    </registry>"#;
    let surface = BindingSurface::from_document(xml, &Request::new("gl", "1.0", "core")).unwrap();
    let constants: Vec<(&str, &str)> = surface.features[0]
        .constants
        .iter()
        .map(|constant| (constant.name.as_str(), constant.value.as_str()))
        .collect();
    assert_eq!(constants, [("C", "0x3"), ("A", "0x1"), ("B", "0x2")]);
}

#[test]
fn profile_does_not_filter() {
    let text = common::fixture();
    let core = BindingSurface::from_document(&text, &Request::new("gl", "2.0", "core")).unwrap();
    let compatibility =
        BindingSurface::from_document(&text, &Request::new("gl", "2.0", "compatibility")).unwrap();
    assert_eq!(core.features, compatibility.features);
    assert_eq!(compatibility.profile, "compatibility");
}

#[test]
fn surface_counts_and_types() {
    let surface =
        BindingSurface::from_document(&common::fixture(), &Request::new("gl", "1.5", "core"))
            .unwrap();
    assert!(surface.version_matched);
    assert_eq!(surface.features.len(), 4);
    assert_eq!(surface.constant_count(), 9);
    assert_eq!(surface.command_count(), 7);
    assert_eq!(surface.types.len(), 12);
}
