use crate::cli::ColumnAction;
use crate::context::CliContext;
use crate::output;
use kanban_domain::{BoardOperations, Id};

pub async fn handle(ctx: &mut CliContext, action: ColumnAction) -> anyhow::Result<()> {
    match action {
        ColumnAction::Create { title } => {
            let column = ctx.session.create_column(title)?;
            ctx.commit().await?;
            output::output_success(ctx.column(&column.id)?);
        }
        ColumnAction::Rename { id, title } => {
            let column = ctx.session.rename_column(Id::from(id), title)?;
            ctx.commit().await?;
            output::output_success(ctx.column(&column.id)?);
        }
        ColumnAction::Delete { id } => {
            ctx.session.delete_column(Id::from(id.as_str()))?;
            ctx.commit().await?;
            output::output_success(serde_json::json!({ "deleted": id }));
        }
        ColumnAction::Reorder { ids } => {
            let order = ids.into_iter().map(Id::from).collect();
            ctx.session.reorder_columns(order)?;
            ctx.commit().await?;
            let columns: Vec<_> = ctx.session.state().ordered_columns().cloned().collect();
            output::output_list(columns);
        }
    }
    Ok(())
}
