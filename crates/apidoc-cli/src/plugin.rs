//! protoc plugin protocol: `CodeGeneratorRequest` on stdin,
//! `CodeGeneratorResponse` on stdout.

use anyhow::{Context, Result};
use apidoc_core::generate_request;
use apidoc_descriptor::GenerationRequest;
use prost::Message;
use prost_types::compiler::code_generator_response::{Feature, File};
use prost_types::compiler::{CodeGeneratorRequest, CodeGeneratorResponse};
use std::io::{Read, Write};

/// Build the response for one request.
///
/// A bad parameter string is reported through the response `error` field so
/// protoc prints it and fails the invocation.
pub fn respond(request: &CodeGeneratorRequest) -> CodeGeneratorResponse {
    let request = GenerationRequest::from_code_generator_request(request);
    match generate_request(&request) {
        Ok(files) => CodeGeneratorResponse {
            supported_features: Some(Feature::Proto3Optional as u64),
            file: files
                .into_iter()
                .map(|f| File {
                    name: Some(f.name),
                    content: Some(f.content),
                    ..Default::default()
                })
                .collect(),
            ..Default::default()
        },
        Err(err) => {
            tracing::error!(%err, "invalid generator parameter");
            CodeGeneratorResponse {
                error: Some(err.to_string()),
                ..Default::default()
            }
        }
    }
}

pub fn run<R: Read, W: Write>(mut input: R, mut output: W) -> Result<()> {
    let mut bytes = Vec::new();
    input
        .read_to_end(&mut bytes)
        .context("failed to read CodeGeneratorRequest from stdin")?;
    let request =
        CodeGeneratorRequest::decode(bytes.as_slice()).context("failed to decode CodeGeneratorRequest")?;

    tracing::debug!(
        files = request.file_to_generate.len(),
        parameter = request.parameter(),
        "received generation request"
    );

    let response = respond(&request);
    output
        .write_all(&response.encode_to_vec())
        .context("failed to write CodeGeneratorResponse")?;
    output.flush()?;
    Ok(())
}
