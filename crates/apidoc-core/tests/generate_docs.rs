use apidoc_core::{generate_request, render::render_message, SchemaIndex};
use apidoc_descriptor::GenerationRequest;

const GREETER: &str = r#"{
  "file": [
    {
      "name": "common.proto",
      "messageType": [{
        "name": "Meta",
        "field": [
          {"name": "trace_id", "number": 1, "label": "LABEL_OPTIONAL", "type": "TYPE_STRING"}
        ]
      }],
      "enumType": [{
        "name": "Mood",
        "value": [{"name": "MOOD_UNKNOWN", "number": 0}, {"name": "HAPPY", "number": 1}]
      }],
      "sourceCodeInfo": {"location": [
        {"path": [5, 0, 2, 1], "span": [1, 2, 12], "trailingComments": " smiling\n"}
      ]}
    },
    {
      "name": "greeter.proto",
      "dependency": ["common.proto"],
      "messageType": [
        {
          "name": "HelloRequest",
          "field": [
            {"name": "name", "number": 1, "label": "LABEL_OPTIONAL", "type": "TYPE_STRING"},
            {"name": "mood", "number": 2, "label": "LABEL_OPTIONAL", "type": "TYPE_ENUM", "typeName": ".Mood"},
            {"name": "meta", "number": 3, "label": "LABEL_OPTIONAL", "type": "TYPE_MESSAGE", "typeName": ".Meta"},
            {"name": "tags", "number": 4, "label": "LABEL_REPEATED", "type": "TYPE_MESSAGE",
             "typeName": ".HelloRequest.TagsEntry"}
          ],
          "nestedType": [{
            "name": "TagsEntry",
            "field": [
              {"name": "key", "number": 1, "label": "LABEL_OPTIONAL", "type": "TYPE_STRING"},
              {"name": "value", "number": 2, "label": "LABEL_OPTIONAL", "type": "TYPE_INT32"}
            ],
            "options": {"mapEntry": true}
          }]
        }
      ],
      "service": [{
        "name": "Greeter",
        "method": [
          {"name": "SayHello", "inputType": ".HelloRequest", "outputType": ".Missing"}
        ]
      }],
      "sourceCodeInfo": {"location": [
        {"path": [4, 0, 2, 0], "span": [3, 2, 18], "leadingComments": " Who to greet.\n"},
        {"path": [6, 0], "span": [8, 0, 10, 1], "leadingComments": " The greeting service.\n"},
        {"path": [6, 0, 2, 0], "span": [9, 2, 40], "leadingComments": " Sends a greeting.\n"}
      ]}
    }
  ]
}"#;

fn greeter_request(parameter: &str) -> GenerationRequest {
    GenerationRequest::from_descriptor_set_json(GREETER, &[], parameter).expect("descriptor")
}

#[test]
fn only_service_files_are_documented() {
    let request = greeter_request("");
    assert_eq!(request.files_to_generate, vec!["greeter.proto".to_string()]);

    let files = generate_request(&request).expect("generate");
    assert_eq!(files.len(), 1);
    assert_eq!(files[0].name, "greeter.md");
}

#[test]
fn explicit_file_without_services_yields_nothing() {
    let request = GenerationRequest::from_descriptor_set_json(GREETER, &["common.proto".to_string()], "")
        .expect("descriptor");
    assert!(generate_request(&request).expect("generate").is_empty());
}

#[test]
fn empty_package_paths_and_anchors() {
    let files = generate_request(&greeter_request("")).expect("generate");
    let doc = &files[0].content;

    assert!(doc.starts_with("# Greeter\n\nThe greeting service.  \n\n"), "{doc}");
    assert!(doc.contains("- [/Greeter/SayHello](#greetersayhello)\n"), "{doc}");
    assert_eq!(doc.matches("](#").count(), 1, "{doc}");
    assert!(doc.contains("## /Greeter/SayHello\n\nSends a greeting.\n\n### Method\n\nPOST\n"), "{doc}");
}

#[test]
fn request_example_resolves_across_files() {
    let files = generate_request(&greeter_request("")).expect("generate");
    let doc = &files[0].content;

    let expected_request = concat!(
        "### Request\n",
        "```javascript\n",
        "{\n",
        "    // Who to greet.\n",
        "    name: \"\", // type:<string>\n",
        "    // MOOD_UNKNOWN(=0)\n",
        "    // HAPPY(=1) smiling\n",
        "    mood: \"\", // type:<string(enum)>\n",
        "    meta: {\n",
        "        trace_id: \"\", // type:<string>\n",
        "    },\n",
        "    tags: {\"\": 0}, // type:<map<string,int>>\n",
        "}\n",
        "```\n",
    );
    assert!(doc.contains(expected_request), "{doc}");
}

#[test]
fn unresolved_reply_still_documents_the_method() {
    let files = generate_request(&greeter_request("")).expect("generate");
    assert!(files[0].content.contains("### Reply\n```javascript\n{\n}\n```\n"));
}

#[test]
fn path_prefix_parameter() {
    let files = generate_request(&greeter_request("path_prefix=/twirp")).expect("generate");
    assert!(files[0].content.contains("- [/twirp/Greeter/SayHello](#twirpgreetersayhello)"));
}

#[test]
fn configuration_errors_are_reported_together() {
    let err = generate_request(&greeter_request("a,b=c")).expect_err("should fail");
    assert_eq!(err.errors.len(), 2);
}

fn map_descriptor(value_type: &str) -> String {
    format!(
        r#"{{"file": [{{
          "name": "m.proto",
          "package": "m",
          "messageType": [{{
            "name": "Holder",
            "field": [{{"name": "attrs", "number": 1, "label": "LABEL_REPEATED", "type": "TYPE_MESSAGE",
                        "typeName": ".m.Holder.AttrsEntry"}}],
            "nestedType": [{{
              "name": "AttrsEntry",
              "field": [
                {{"name": "key", "number": 1, "label": "LABEL_OPTIONAL", "type": "TYPE_STRING"}},
                {{"name": "value", "number": 2, "label": "LABEL_OPTIONAL", "type": "{value_type}"}}
              ],
              "options": {{"mapEntry": true}}
            }}]
          }}]
        }}]}}"#
    )
}

#[test]
fn map_fields_render_as_maps_for_every_scalar_value() {
    let cases = [
        ("TYPE_STRING", r#"{"":""}"#, "string"),
        ("TYPE_BYTES", r#"{"":""}"#, "string(bytes)"),
        ("TYPE_INT32", r#"{"":0}"#, "int"),
        ("TYPE_SINT32", r#"{"":0}"#, "int"),
        ("TYPE_UINT32", r#"{"":0}"#, "int"),
        ("TYPE_INT64", r#"{"":"0"}"#, "string(int64)"),
        ("TYPE_FIXED64", r#"{"":"0"}"#, "string(int64)"),
        ("TYPE_DOUBLE", r#"{"":0.0}"#, "float"),
        ("TYPE_FLOAT", r#"{"":0.0}"#, "float"),
        ("TYPE_BOOL", r#"{"":false}"#, "bool"),
    ];

    for (value_type, literal, label) in cases {
        let request = GenerationRequest::from_descriptor_set_json(&map_descriptor(value_type), &["m.proto".to_string()], "")
            .expect("descriptor");
        let index = SchemaIndex::build(&request.files);
        let rendered = render_message(&index, index.lookup_message("m.Holder"));
        assert_eq!(
            rendered,
            format!("{{\nattrs: {literal}, // type:<map<string,{label}>>\n}}"),
            "value type {value_type}"
        );
    }
}
