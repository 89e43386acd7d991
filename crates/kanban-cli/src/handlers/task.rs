use crate::cli::TaskAction;
use crate::context::CliContext;
use crate::output;
use kanban_domain::{BoardOperations, Id};

pub async fn handle(ctx: &mut CliContext, action: TaskAction) -> anyhow::Result<()> {
    match action {
        TaskAction::Create { column_id, content } => {
            let task = ctx.session.create_task(Id::from(column_id), content)?;
            ctx.commit().await?;
            output::output_success(ctx.task(&task.id)?);
        }
        TaskAction::Edit { id, content } => {
            let task = ctx.session.update_task_content(Id::from(id), content)?;
            ctx.commit().await?;
            output::output_success(ctx.task(&task.id)?);
        }
        TaskAction::Delete { id } => {
            ctx.session.delete_task(Id::from(id.as_str()))?;
            ctx.commit().await?;
            output::output_success(serde_json::json!({ "deleted": id }));
        }
        TaskAction::Move {
            id,
            column_id,
            position,
        } => {
            let task = ctx.session.move_task(
                Id::from(id),
                Id::from(column_id),
                position.unwrap_or(usize::MAX),
            )?;
            ctx.commit().await?;
            output::output_success(ctx.task(&task.id)?);
        }
        TaskAction::Reorder { column_id, ids } => {
            let column_id = Id::from(column_id);
            let order = ids.into_iter().map(Id::from).collect();
            ctx.session.reorder_tasks(column_id.clone(), order)?;
            ctx.commit().await?;
            let column = ctx.column(&column_id)?;
            let tasks: Vec<_> = ctx.session.state().tasks_in(&column).cloned().collect();
            output::output_list(tasks);
        }
    }
    Ok(())
}
