//! One generation run: index the request, build service catalogs, assemble
//! one Markdown document per schema file that declares services.

use crate::catalog::ServiceCatalog;
use crate::error::ConfigError;
use crate::index::SchemaIndex;
use crate::markdown::render_document;
use crate::params::CommandLineParams;
use apidoc_descriptor::{FileDescriptor, GenerationRequest};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedFile {
    /// Output path relative to the output directory.
    pub name: String,
    pub content: String,
}

#[derive(Debug, Clone, Default)]
pub struct Generator {
    params: CommandLineParams,
}

impl Generator {
    pub fn new(params: CommandLineParams) -> Self {
        Self { params }
    }

    pub fn from_parameter(parameter: &str) -> Result<Self, ConfigError> {
        Ok(Self::new(CommandLineParams::parse(parameter)?))
    }

    pub fn params(&self) -> &CommandLineParams {
        &self.params
    }

    pub fn generate(&self, request: &GenerationRequest) -> Vec<GeneratedFile> {
        let index = SchemaIndex::build(&request.files);
        tracing::debug!(
            messages = index.message_count(),
            enums = index.enum_count(),
            "schema index ready"
        );

        request
            .targets()
            .filter_map(|file| self.generate_file(file, &index))
            .collect()
    }

    /// `None` when `file` declares no service.
    pub fn generate_file(&self, file: &FileDescriptor, index: &SchemaIndex) -> Option<GeneratedFile> {
        if !file.has_services() {
            tracing::debug!(file = %file.name, "no services; skipping");
            return None;
        }

        let catalogs: Vec<ServiceCatalog> = file
            .services
            .iter()
            .map(|service| ServiceCatalog::build(service, index, &self.params))
            .collect();

        let name = output_name(&file.name);
        tracing::debug!(file = %file.name, output = %name, services = catalogs.len(), "rendered document");
        Some(GeneratedFile {
            name,
            content: render_document(&catalogs),
        })
    }
}

/// Parse the request's own parameter string, then generate.
pub fn generate_request(request: &GenerationRequest) -> Result<Vec<GeneratedFile>, ConfigError> {
    Ok(Generator::from_parameter(&request.parameter)?.generate(request))
}

/// `foo/bar.proto` → `foo/bar.md`
pub fn output_name(proto_file: &str) -> String {
    let stem = proto_file.strip_suffix(".proto").unwrap_or(proto_file);
    format!("{stem}.md")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::*;

    fn greeter_request(parameter: &str) -> GenerationRequest {
        let messages = vec![
            message("hello.HelloRequest", vec![scalar("name", WireType::String)]),
            message("hello.HelloReply", vec![scalar("message", WireType::String)]),
        ];
        let mut greeter = file("hello/greeter.proto", "hello", messages, vec![]);
        greeter.services.push(service(
            "hello.Greeter",
            "",
            &[("SayHello", ".hello.HelloRequest", ".hello.HelloReply", "")],
        ));
        let types = file("hello/types.proto", "hello", vec![], vec![]);

        GenerationRequest {
            files_to_generate: vec!["hello/greeter.proto".to_string(), "hello/types.proto".to_string()],
            parameter: parameter.to_string(),
            files: vec![types, greeter],
        }
    }

    #[test]
    fn output_names() {
        assert_eq!(output_name("greeter.proto"), "greeter.md");
        assert_eq!(output_name("a/b/c.proto"), "a/b/c.md");
        assert_eq!(output_name("schema"), "schema.md");
    }

    #[test]
    fn only_files_with_services_produce_documents() {
        let files = generate_request(&greeter_request("")).expect("generate");
        assert_eq!(files.len(), 1);
        assert_eq!(files[0].name, "hello/greeter.md");
        assert!(files[0].content.starts_with("# Greeter\n"));
        assert!(files[0].content.contains("## /hello.Greeter/SayHello"));
    }

    #[test]
    fn path_prefix_flows_into_document() {
        let files = generate_request(&greeter_request("path_prefix=/api")).expect("generate");
        assert!(files[0].content.contains("- [/api/hello.Greeter/SayHello](#apihellogreetersayhello)"));
    }

    #[test]
    fn bad_parameter_stops_generation() {
        let err = generate_request(&greeter_request("oops")).expect_err("should fail");
        assert_eq!(err.errors.len(), 1);
    }

    #[test]
    fn all_services_of_a_file_share_one_document() {
        let mut request = greeter_request("");
        let greeter = request
            .files
            .iter_mut()
            .find(|f| f.name == "hello/greeter.proto")
            .expect("greeter file");
        greeter.services.push(service(
            "hello.Farewell",
            "",
            &[("SayBye", ".hello.HelloRequest", ".hello.HelloReply", "")],
        ));

        let files = Generator::default().generate(&request);
        assert_eq!(files.len(), 1);
        let content = &files[0].content;
        assert!(content.contains("# Greeter"));
        assert!(content.contains("# Farewell"));
        assert!(content.contains("## /hello.Farewell/SayBye"));
    }
}
