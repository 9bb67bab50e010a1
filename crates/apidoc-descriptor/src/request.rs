use crate::json::parse_descriptor_set_json;
use crate::{DescriptorError, FileDescriptor};
use prost::Message as _;
use prost_types::compiler::CodeGeneratorRequest;
use prost_types::FileDescriptorProto;

/// One generation run's input: which files to document, the raw parameter
/// string, and every file descriptor involved (transitive imports included).
#[derive(Debug, Clone, Default)]
pub struct GenerationRequest {
    pub files_to_generate: Vec<String>,
    pub parameter: String,
    pub files: Vec<FileDescriptor>,
}

impl GenerationRequest {
    /// Decode the binary request protoc writes to a plugin's stdin.
    pub fn decode(bytes: &[u8]) -> Result<Self, DescriptorError> {
        let request = CodeGeneratorRequest::decode(bytes)?;
        Ok(Self::from_code_generator_request(&request))
    }

    pub fn from_code_generator_request(request: &CodeGeneratorRequest) -> Self {
        Self {
            files_to_generate: request.file_to_generate.clone(),
            parameter: request.parameter().to_string(),
            files: lower(&request.proto_file),
        }
    }

    /// Build a request from a Buf descriptor set JSON.
    ///
    /// With an empty `files_to_generate`, every file that declares a service
    /// is selected.
    pub fn from_descriptor_set_json(
        text: &str,
        files_to_generate: &[String],
        parameter: &str,
    ) -> Result<Self, DescriptorError> {
        let files = lower(&parse_descriptor_set_json(text)?);

        let files_to_generate = if files_to_generate.is_empty() {
            files
                .iter()
                .filter(|f| f.has_services())
                .map(|f| f.name.clone())
                .collect()
        } else {
            for name in files_to_generate {
                if !files.iter().any(|f| &f.name == name) {
                    return Err(DescriptorError::MissingFile(name.clone()));
                }
            }
            files_to_generate.to_vec()
        };

        Ok(Self {
            files_to_generate,
            parameter: parameter.to_string(),
            files,
        })
    }

    pub fn file(&self, name: &str) -> Option<&FileDescriptor> {
        self.files.iter().find(|f| f.name == name)
    }

    /// Files to generate, in request order. Names missing from `files` are
    /// skipped.
    pub fn targets(&self) -> impl Iterator<Item = &FileDescriptor> + '_ {
        self.files_to_generate.iter().filter_map(|name| {
            let file = self.file(name);
            if file.is_none() {
                tracing::warn!(file = %name, "file to generate has no descriptor; skipping");
            }
            file
        })
    }
}

fn lower(files: &[FileDescriptorProto]) -> Vec<FileDescriptor> {
    files.iter().map(FileDescriptor::from_proto).collect()
}
