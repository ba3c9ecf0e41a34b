use args::Args;
use clap::Parser;
use credentials::{ExtractedCredentials, Extraction, mapping, materialize};
use http::HeaderMap;
use serde_json::{Value, json};

mod args;
mod logger;

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    logger::init(&args);

    let config = args.config()?;
    let request = args.request()?;

    let extraction = credentials::inspect_request(&request, &config.passthrough);
    let ignored = ignored_headers(request.headers());

    println!("{:#}", report(&extraction, &ignored, args.reveal));

    Ok(())
}

/// Headers carrying a Jira or Confluence prefix that the extraction does not recognize.
fn ignored_headers(headers: &HeaderMap) -> Vec<&str> {
    let ignored: Vec<_> = headers
        .keys()
        .map(|name| name.as_str())
        .filter(|name| mapping::is_unknown_credential_header(name))
        .collect();

    for name in &ignored {
        log::warn!("Ignoring unrecognized credential header: {name}");
    }

    ignored
}

/// Render the outcome of an extraction as JSON.
fn report(extraction: &Extraction, ignored: &[&str], reveal: bool) -> Value {
    match extraction {
        Extraction::Disabled => json!({ "status": "disabled", "credentials": null }),
        Extraction::NoHeaders => json!({
            "status": "no_headers",
            "credentials": null,
            "ignored": ignored,
        }),
        Extraction::Extracted(credentials) => {
            let overrides = materialize(credentials);

            json!({
                "status": "extracted",
                "credentials": values(credentials, reveal),
                "ignored": ignored,
                "jira": overrides.jira(),
                "confluence": overrides.confluence(),
            })
        }
    }
}

fn values(credentials: &ExtractedCredentials, reveal: bool) -> Value {
    let values = credentials
        .iter()
        .map(|(field, value)| {
            let value = if reveal {
                value.to_string()
            } else {
                credentials::display_value(field, value).into_owned()
            };

            (field.to_string(), Value::String(value))
        })
        .collect();

    Value::Object(values)
}
