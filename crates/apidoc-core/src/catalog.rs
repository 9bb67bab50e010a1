//! API catalog: one record per RPC method of a service.

use crate::index::SchemaIndex;
use crate::model::Message;
use crate::params::CommandLineParams;
use crate::render::Renderer;
use apidoc_descriptor::{MethodDescriptor, ServiceDescriptor};

/// Every method is documented as a JSON-over-HTTP POST.
pub const HTTP_METHOD: &str = "POST";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Api {
    pub full_name: String,
    pub http_method: &'static str,
    /// `<prefix>/<package.Service>/<Method>`
    pub path: String,
    pub doc: String,
    /// Fully-qualified request message name, no leading dot.
    pub request: String,
    pub reply: String,
    pub request_example: String,
    pub reply_example: String,
}

impl Api {
    pub fn request_message<'i>(&self, index: &'i SchemaIndex) -> Option<&'i Message> {
        index.lookup_message(&self.request)
    }

    pub fn reply_message<'i>(&self, index: &'i SchemaIndex) -> Option<&'i Message> {
        index.lookup_message(&self.reply)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceCatalog {
    pub name: String,
    pub full_name: String,
    pub doc: String,
    pub apis: Vec<Api>,
}

impl ServiceCatalog {
    pub fn build(service: &ServiceDescriptor, index: &SchemaIndex, params: &CommandLineParams) -> Self {
        let apis = service
            .methods
            .iter()
            .map(|method| build_api(service, method, index, params))
            .collect();
        tracing::debug!(
            service = %service.full_name,
            methods = service.methods.len(),
            "built api catalog"
        );
        Self {
            name: service.name.clone(),
            full_name: service.full_name.clone(),
            doc: service.comments.leading.clone(),
            apis,
        }
    }
}

fn build_api(
    service: &ServiceDescriptor,
    method: &MethodDescriptor,
    index: &SchemaIndex,
    params: &CommandLineParams,
) -> Api {
    let request = method.input_type.trim_start_matches('.').to_string();
    let reply = method.output_type.trim_start_matches('.').to_string();

    for (role, name) in [("request", &request), ("reply", &reply)] {
        if index.lookup_message(name).is_none() {
            tracing::warn!(
                method = %method.full_name,
                role,
                type_name = %name,
                "type not found in schema index; rendering empty object"
            );
        }
    }

    let mut renderer = Renderer::new(index);
    let request_example = renderer.render_message(index.lookup_message(&request));
    let reply_example = renderer.render_message(index.lookup_message(&reply));

    Api {
        full_name: method.full_name.clone(),
        http_method: HTTP_METHOD,
        path: format!("{}/{}/{}", params.path_prefix, service.full_name, method.name),
        // one Markdown paragraph per comment line
        doc: method.comments.leading.replace('\n', "\n\n"),
        request,
        reply,
        request_example,
        reply_example,
    }
}
