// ABOUTME: Deploy command implementation.
// ABOUTME: Drives the rollout state machine stage by stage.

use crate::cluster::{ServiceOps, TaskDefinitionOps, TaskOps};
use crate::config::Config;
use crate::error::Result;
use crate::output::Output;
use crate::rollout::Rollout;
use crate::types::ImageRef;

/// Run the full rollout against the given cluster API handle.
///
/// Generic over the API traits so integration tests can drive the whole
/// pipeline with an in-memory cluster.
pub async fn deploy<C>(
    config: Config,
    image: Option<ImageRef>,
    cluster_api: &C,
    mut output: Output,
) -> Result<()>
where
    C: TaskDefinitionOps + TaskOps + ServiceOps,
{
    output.start_timer();

    output.progress(&format!(
        "Rolling out to cluster {} ({} task definition(s), {} one-off command(s), {} service(s))",
        config.cluster,
        config.task_definitions.len(),
        config.one_off_commands.len(),
        config.services.len(),
    ));
    if let Some(ref image) = image {
        output.progress(&format!("  Image: {image}"));
    }

    let rollout = Rollout::new(config, image);

    output.progress("  → Registering task definitions...");
    let rollout = rollout.register(cluster_api, &output).await?;

    if !rollout.config().one_off_commands.is_empty() {
        output.progress("  → Running one-off commands...");
    }
    let rollout = rollout.run_commands(cluster_api, &output).await?;

    output.progress("  → Upserting services...");
    let rollout = rollout.upsert_services(cluster_api, &output).await?;

    output.progress("  → Waiting for services to converge...");
    let rollout = rollout.await_running(cluster_api, &output).await?;

    output.success(&format!(
        "Rollout complete: {} task definition(s) live on {}",
        rollout.rolled_out().len(),
        rollout.cluster(),
    ));

    Ok(())
}
