use crate::cli::BoardAction;
use crate::context::CliContext;
use crate::output;
use kanban_domain::BoardOperations;

pub async fn handle(ctx: &mut CliContext, action: BoardAction) -> anyhow::Result<()> {
    match action {
        BoardAction::Show => {
            let view = ctx.session.view();
            output::output_success(&view);
        }
    }
    Ok(())
}
