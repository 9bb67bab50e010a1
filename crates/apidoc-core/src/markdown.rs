//! Markdown assembly for service catalogs.

use crate::beautify::beautify;
use crate::catalog::{Api, ServiceCatalog};
use std::fmt::Write;

/// In-page anchor for an API path: `/` and `.` removed, lower-cased.
pub fn anchor_for(path: &str) -> String {
    path.chars()
        .filter(|c| *c != '/' && *c != '.')
        .collect::<String>()
        .to_lowercase()
}

/// One document for all services of a file, in declaration order.
pub fn render_document(services: &[ServiceCatalog]) -> String {
    let mut out = String::new();
    for (i, service) in services.iter().enumerate() {
        if i > 0 {
            out.push('\n');
        }
        write_service(&mut out, service);
    }
    out
}

fn write_service(out: &mut String, service: &ServiceCatalog) {
    let _ = writeln!(out, "# {}", service.name);
    let _ = writeln!(out);

    if !service.doc.is_empty() {
        // two trailing spaces keep comment lines as hard line breaks
        for line in service.doc.split('\n') {
            let _ = writeln!(out, "{line}  ");
        }
        let _ = writeln!(out);
    }

    for api in &service.apis {
        let _ = writeln!(out, "- [{}](#{})", api.path, anchor_for(&api.path));
    }
    let _ = writeln!(out);

    for api in &service.apis {
        write_api(out, api);
    }
}

fn write_api(out: &mut String, api: &Api) {
    let _ = writeln!(out, "## {}", api.path);
    let _ = writeln!(out);
    if !api.doc.is_empty() {
        let _ = writeln!(out, "{}", api.doc);
        let _ = writeln!(out);
    }
    let _ = writeln!(out, "### Method");
    let _ = writeln!(out);
    let _ = writeln!(out, "{}", api.http_method);
    let _ = writeln!(out);
    write_example(out, "Request", &api.request_example);
    let _ = writeln!(out);
    write_example(out, "Reply", &api.reply_example);
    let _ = writeln!(out);
}

fn write_example(out: &mut String, title: &str, example: &str) {
    let _ = writeln!(out, "### {title}");
    let _ = writeln!(out, "```javascript");
    let _ = writeln!(out, "{}", beautify(example));
    let _ = writeln!(out, "```");
}
