use crate::cli::core::{
    format_date, parse_id, required_id, CommandError, CommandResult, ShellContext,
};
use crate::cli::io;
use crate::cli::output::{render_table, section};
use crate::cli::registry::CommandEntry;
use crate::core::services::DocumentService;
use crate::upload::{StagedUpload, UploadError, UploadTask};

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![CommandEntry::new(
        "document",
        "Document operations (list, upload, delete)",
        "document <list|upload|delete> ...",
        cmd_document,
    )]
}

fn cmd_document(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let Some((subcommand, rest)) = args.split_first() else {
        return Err(CommandError::InvalidArguments(
            "usage: document <list|upload|delete>".into(),
        ));
    };
    match subcommand.to_ascii_lowercase().as_str() {
        "list" => handle_list(context),
        "upload" => handle_upload(context, rest),
        "delete" | "remove" => handle_delete(context, rest),
        other => Err(CommandError::InvalidArguments(format!(
            "unknown document subcommand `{}`. Available: list, upload, delete",
            other
        ))),
    }
}

pub(crate) fn handle_list(context: &mut ShellContext) -> CommandResult {
    section("Uploaded Documents");
    let rows: Vec<Vec<String>> = context
        .ledger()
        .documents
        .iter()
        .map(|doc| {
            vec![
                doc.id.to_string(),
                doc.name.clone(),
                doc.kind.label().to_string(),
                doc.size.clone(),
                format_date(doc.uploaded_at),
                doc.bill_id
                    .map(|id| format!("bill {}", id))
                    .unwrap_or_else(|| "-".to_string()),
            ]
        })
        .collect();
    render_table(
        &["ID", "Name", "Type", "Size", "Uploaded", "Attached To"],
        &rows,
        "No documents found. Upload a document to get started.",
    );
    Ok(())
}

/// The two-phase flow: stage the named file, confirm, then run the simulated
/// transfer and register the resulting record.
fn handle_upload(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let Some(file_name) = args.first() else {
        return Err(CommandError::InvalidArguments(
            "usage: document upload <file> [bill_id]".into(),
        ));
    };
    let bill_id = match args.get(1) {
        Some(value) => {
            let id = parse_id(value)?;
            if context.ledger().bill(id).is_none() {
                io::print_warning(format!("No bill with id {}.", id));
                return Ok(());
            }
            Some(id)
        }
        None => None,
    };

    let staged = StagedUpload::new(*file_name, bill_id);
    if !context.confirm(&format!("Are you sure you want to upload {}?", file_name))? {
        io::print_info("Upload cancelled.");
        return Ok(());
    }

    io::print_info(format!("Uploading {}...", file_name));
    let task = UploadTask::spawn(staged, context.today(), context.upload_delay());
    match task.join() {
        Ok(uploaded) => {
            let size = uploaded.size.clone();
            DocumentService::register(context.ledger_mut(), uploaded);
            context.save_snapshot()?;
            io::print_success(format!(
                "Your file has been uploaded successfully ({}).",
                size
            ));
            Ok(())
        }
        Err(UploadError::Cancelled) => {
            io::print_warning("Upload cancelled.");
            Ok(())
        }
        Err(err) => Err(err.into()),
    }
}

fn handle_delete(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let id = required_id(args, "document delete <id>")?;
    let Some(name) = context.ledger().document(id).map(|d| d.name.clone()) else {
        io::print_warning(format!("No document with id {}.", id));
        return Ok(());
    };
    if !context.confirm(
        "Are you sure you want to delete this document? This action cannot be undone. Continue?",
    )? {
        return Ok(());
    }
    DocumentService::remove(context.ledger_mut(), id)?;
    context.save_snapshot()?;
    io::print_success(format!("{} has been deleted.", name));
    Ok(())
}
