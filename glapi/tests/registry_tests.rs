// SPDX-FileCopyrightText: 2025 Contributors to the glapi project.
// SPDX-License-Identifier: Apache-2.0

//! Registry parser tests: type aliases, constants and command signatures.

mod common;

use glapi::{Error, Registry};

fn fixture_registry() -> Registry {
    common::setup_logging();
    Registry::parse_str(&common::fixture()).unwrap()
}

#[test]
fn types_keep_document_order_and_skip_non_typedefs() {
    let registry = fixture_registry();
    let types: Vec<&str> = registry.types.iter().map(|entry| entry.as_str()).collect();
    assert_eq!(
        types,
        [
            "typedef unsigned int GLenum;",
            "typedef unsigned char GLboolean;",
            "typedef unsigned int GLbitfield;",
            "typedef void GLvoid;",
            "typedef khronos_float_t GLfloat;",
            "typedef int GLint;",
            "typedef int GLsizei;",
            "typedef khronos_uint8_t GLubyte;",
            "typedef unsigned int GLuint;",
            "typedef khronos_ssize_t GLsizeiptr;",
            "typedef struct __GLsync *GLsync;",
            "typedef void (APIENTRY *GLDEBUGPROC)(GLenum source, const void *userParam);",
        ]
    );
}

#[test]
fn type_terminator_is_never_duplicated() {
    let registry = fixture_registry();
    for entry in &registry.types {
        assert!(entry.as_str().ends_with(';'), "{entry}");
        assert!(!entry.as_str().ends_with(";;"), "{entry}");
    }
}

#[test]
fn constants_without_value_are_skipped() {
    let registry = fixture_registry();
    assert_eq!(registry.constants.len(), 11);
    assert_eq!(registry.constants["GL_COLOR_BUFFER_BIT"], "0x00004000");
    assert_eq!(registry.constants["GL_TRUE"], "1");
    assert!(!registry.constants.contains_key("GL_NO_VALUE"));
}

#[test]
fn later_constant_definition_wins() {
    let registry = Registry::parse_str(
        r#"<registry>
             <enums><enum name="GL_X" value="0x1"/></enums>
             <enums><enum name="GL_X" value="0x2"/></enums>
           </registry>"#,
    )
    .unwrap();
    assert_eq!(registry.constants["GL_X"], "0x2");
}

#[test]
fn command_return_type_prefers_type_marker() {
    let registry = fixture_registry();
    assert_eq!(registry.commands.len(), 8);

    let clear = &registry.commands["glClear"];
    assert_eq!(clear.return_type, "void");
    assert_eq!(clear.declared_return_type, "void");

    let get_string = &registry.commands["glGetString"];
    assert_eq!(get_string.return_type, "GLubyte");
    assert_eq!(get_string.declared_return_type, "const GLubyte *");

    assert_eq!(registry.commands["glCreateShader"].return_type, "GLuint");
}

#[test]
fn command_params_keep_declaration_order() {
    let registry = fixture_registry();
    let names: Vec<&str> = registry.commands["glClearColor"]
        .params
        .iter()
        .map(|param| param.name.as_str())
        .collect();
    assert_eq!(names, ["red", "green", "blue", "alpha"]);
    assert!(registry.commands["glFinish"].params.is_empty());
}

#[test]
fn param_type_falls_back_to_leading_text() {
    let registry = fixture_registry();
    let params = &registry.commands["glBufferData"].params;

    assert_eq!(params[1].ty, "GLsizeiptr");
    assert_eq!(params[2].ty, "const void *");
    assert_eq!(params[2].declared_ty, "const void *");

    let buffers = &registry.commands["glGenBuffers"].params[1];
    assert_eq!(buffers.ty, "GLuint");
    assert_eq!(buffers.declared_ty, "GLuint *");
}

#[test]
fn not_well_formed_xml_is_fatal() {
    let result = Registry::parse_str("<registry><types></registry>");
    assert!(matches!(result, Err(Error::Xml(_))));
}

#[test]
fn command_without_name_is_fatal() {
    let result = Registry::parse_str(
        r#"<registry><commands>
             <command><proto>void</proto></command>
           </commands></registry>"#,
    );
    assert!(matches!(
        result,
        Err(Error::MalformedRegistry { missing: "<name>", .. })
    ));
}

#[test]
fn command_without_proto_is_fatal() {
    let result = Registry::parse_str(
        r#"<registry><commands>
             <command><param><ptype>GLenum</ptype> <name>mode</name></param></command>
           </commands></registry>"#,
    );
    assert!(matches!(
        result,
        Err(Error::MalformedRegistry { missing: "<proto>", .. })
    ));
}

#[test]
fn param_without_name_is_fatal() {
    let result = Registry::parse_str(
        r#"<registry><commands>
             <command>
               <proto>void <name>glFoo</name></proto><param><ptype>GLenum</ptype></param>
             </command>
           </commands></registry>"#,
    );
    assert!(matches!(result, Err(Error::MalformedRegistry { .. })));
}
