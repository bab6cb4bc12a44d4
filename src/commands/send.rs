use std::fs;
use std::path::PathBuf;

use crate::api::models::{Attachment, SendOutcome, SendRequest};
use crate::cli::SendArgs;
use crate::context::AppContext;
use crate::error::{AppError, AppResult};
use crate::mail::mime;
use crate::output;

/// Provider ceiling on the total message size; checked locally so an
/// oversized send never costs a round trip.
const MAX_ATTACHMENT_TOTAL_BYTES: u64 = 25 * 1024 * 1024;

pub async fn run(ctx: &AppContext, args: SendArgs) -> AppResult<()> {
    let request = build_send_request(args)?;
    let raw = mime::build_raw_message(&request);

    let access_token = ctx.access_token().await?;
    log::debug!("sending message to {}", request.to.join(", "));
    let response = ctx.client.send(&raw, &access_token).await?;

    let outcome = SendOutcome {
        // For a fresh (non-reply) message the provider threads it under its
        // own id.
        thread_id: response.thread_id.unwrap_or_else(|| response.id.clone()),
        message_id: response.id,
        to: request.to,
        subject: request.subject,
    };
    output::print_success(&outcome)
}

fn build_send_request(args: SendArgs) -> AppResult<SendRequest> {
    let to = clean_addresses(args.to);
    if to.is_empty() {
        return Err(AppError::Validation(
            "at least one --to recipient is required".to_string(),
        ));
    }

    let cc = clean_addresses(args.cc);
    let bcc = clean_addresses(args.bcc);
    for address in to.iter().chain(&cc).chain(&bcc) {
        if !is_valid_address(address) {
            return Err(AppError::Validation(format!(
                "invalid email address: {address}"
            )));
        }
    }

    let body = read_body(args.body, args.body_file)?;
    let attachments = read_attachments(&args.attach)?;

    Ok(SendRequest {
        to,
        cc,
        bcc,
        subject: args.subject,
        body,
        attachments,
    })
}

fn clean_addresses(addresses: Vec<String>) -> Vec<String> {
    addresses
        .into_iter()
        .map(|address| address.trim().to_string())
        .filter(|address| !address.is_empty())
        .collect()
}

/// Syntactic check only: non-empty local part, non-empty domain containing a
/// dot. Deliverability is the provider's concern.
fn is_valid_address(address: &str) -> bool {
    let Some((local, domain)) = address.rsplit_once('@') else {
        return false;
    };

    !local.is_empty() && !domain.is_empty() && domain.contains('.')
}

fn read_body(body: Option<String>, body_file: Option<PathBuf>) -> AppResult<String> {
    match (body, body_file) {
        (Some(_), Some(_)) => Err(AppError::Validation(
            "pass only one body source: --body or --body-file".to_string(),
        )),
        (None, None) => Err(AppError::Validation(
            "missing body source; pass --body or --body-file".to_string(),
        )),
        (Some(body), None) => Ok(body),
        (None, Some(path)) => fs::read_to_string(&path).map_err(|err| {
            AppError::Validation(format!("unable to read body file {}: {err}", path.display()))
        }),
    }
}

fn read_attachments(paths: &[PathBuf]) -> AppResult<Vec<Attachment>> {
    let mut attachments = Vec::new();

    for path in paths {
        let data = fs::read(path).map_err(|err| {
            AppError::Validation(format!("unable to read attachment {}: {err}", path.display()))
        })?;
        let filename = path
            .file_name()
            .map(|value| value.to_string_lossy().to_string())
            .ok_or_else(|| {
                AppError::Validation(format!("invalid attachment path: {}", path.display()))
            })?;
        let mime_type = mime_guess::from_path(path)
            .first_or_octet_stream()
            .essence_str()
            .to_string();

        attachments.push(Attachment {
            filename,
            mime_type,
            data,
        });
    }

    check_attachment_total(attachments.iter().map(|attachment| attachment.data.len() as u64))?;
    Ok(attachments)
}

fn check_attachment_total(sizes: impl Iterator<Item = u64>) -> AppResult<()> {
    let total: u64 = sizes.sum();
    if total > MAX_ATTACHMENT_TOTAL_BYTES {
        return Err(AppError::Validation(format!(
            "attachments total {total} bytes, exceeding the {MAX_ATTACHMENT_TOTAL_BYTES} byte limit"
        )));
    }

    Ok(())
}
