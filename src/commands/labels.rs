use crate::api::client::GmailClient;
use crate::api::models::{LabelCreateView, LabelListView, LabelMutationView, MessageOutcome};
use crate::cli::{LabelAction, LabelsArgs};
use crate::context::AppContext;
use crate::error::{AppError, AppResult};
use crate::output;

pub async fn run(ctx: &AppContext, args: LabelsArgs) -> AppResult<()> {
    match args.action {
        LabelAction::List => list(ctx).await,
        LabelAction::Create => {
            let name = args.name.ok_or_else(|| {
                AppError::Validation("the create action requires --name".to_string())
            })?;
            create(ctx, &name).await
        }
        LabelAction::Apply | LabelAction::Remove => {
            let label_name = args.label_name.ok_or_else(|| {
                AppError::Validation("apply/remove require --label-name".to_string())
            })?;
            if args.message_ids.is_empty() {
                return Err(AppError::Validation(
                    "apply/remove require --message-ids".to_string(),
                ));
            }

            mutate(ctx, args.action, &label_name, &args.message_ids).await
        }
    }
}

async fn list(ctx: &AppContext) -> AppResult<()> {
    let access_token = ctx.access_token().await?;
    let labels = ctx.client.list_labels(&access_token).await?;

    let system_count = labels.iter().filter(|label| label.kind == "system").count();
    let view = LabelListView {
        total_count: labels.len(),
        system_count,
        user_count: labels.len() - system_count,
        labels,
    };
    output::print_success(&view)
}

async fn create(ctx: &AppContext, name: &str) -> AppResult<()> {
    // Reserved names fail here, before any token load or refresh happens.
    if crate::api::labels::is_system_label(name) {
        return Err(AppError::Validation(format!(
            "`{name}` is a reserved system label and cannot be created"
        )));
    }

    let access_token = ctx.access_token().await?;
    let created = ctx.client.create_label(name, &access_token).await?;

    let view = LabelCreateView {
        action: "create",
        label_id: created.id,
        label_name: created.name,
    };
    output::print_success(&view)
}

async fn mutate(
    ctx: &AppContext,
    action: LabelAction,
    label_name: &str,
    message_ids: &[String],
) -> AppResult<()> {
    let access_token = ctx.access_token().await?;
    let view = mutate_batch(&ctx.client, &access_token, action, label_name, message_ids).await?;
    output::print_success(&view)
}

/// Applies or removes one label across a batch of messages, one modify call
/// per id. A failing id never aborts the rest of the batch; its outcome is
/// recorded and reported. Only a fully failed batch becomes an error.
pub async fn mutate_batch(
    client: &GmailClient,
    access_token: &str,
    action: LabelAction,
    label_name: &str,
    message_ids: &[String],
) -> AppResult<LabelMutationView> {
    let label = client.resolve_label(label_name, access_token).await?;

    let (add_ids, remove_ids) = match action {
        LabelAction::Apply => (vec![label.id.clone()], Vec::new()),
        LabelAction::Remove => (Vec::new(), vec![label.id.clone()]),
        _ => unreachable!("mutate only handles apply/remove"),
    };

    let mut outcomes = Vec::with_capacity(message_ids.len());
    for message_id in message_ids {
        let result = client
            .modify_message_labels(message_id, &add_ids, &remove_ids, access_token)
            .await;

        outcomes.push(match result {
            Ok(()) => MessageOutcome {
                message_id: message_id.clone(),
                status: "ok",
                message: None,
            },
            Err(err) => {
                log::debug!("label mutation failed for {message_id}: {err}");
                MessageOutcome {
                    message_id: message_id.clone(),
                    status: "error",
                    message: Some(err.to_string()),
                }
            }
        });
    }

    let failed_count = outcomes
        .iter()
        .filter(|outcome| outcome.status == "error")
        .count();

    if !outcomes.is_empty() && failed_count == outcomes.len() {
        let first = outcomes
            .iter()
            .find_map(|outcome| outcome.message.as_deref())
            .unwrap_or("unknown error");
        return Err(AppError::Label(format!(
            "label mutation failed for all {} message(s): {first}",
            outcomes.len()
        )));
    }

    Ok(LabelMutationView {
        action: match action {
            LabelAction::Apply => "apply",
            _ => "remove",
        },
        label_name: label.name,
        label_id: label.id,
        applied_count: outcomes.len() - failed_count,
        failed_count,
        outcomes,
    })
}
