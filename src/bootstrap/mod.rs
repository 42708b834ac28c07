//! Workspace bootstrap and first display of the catalog.
//!
//! Runs once per process, on the first frame where the host reports it is
//! idle: required workspace files are materialized from the bundled
//! resources, then the catalog window is opened (or raised).

mod artifacts;
mod sequencer;
mod window;


pub use sequencer::{BootstrapReport, BootstrapSequencer};
pub use window::{display_catalog, CatalogWindow};

use bevy::prelude::*;

use artifacts::DirBundle;
use sequencer::BootstrapState;

use crate::catalog::RefreshCatalog;
use crate::config::{AppConfig, ConfigLoaded};

/// What the host is busy with. Bootstrap waits until both are false.
#[derive(Resource, Default, Debug)]
pub struct HostStatus {
    pub compiling: bool,
    pub playing: bool,
}

impl HostStatus {
    pub fn is_idle(&self) -> bool {
        !self.compiling && !self.playing
    }
}

/// Bootstrap progress and the report of the completed run.
#[derive(Resource, Default)]
pub struct Bootstrap {
    pub sequencer: BootstrapSequencer,
    pub last_report: Option<BootstrapReport>,
}

pub struct BootstrapPlugin;

impl Plugin for BootstrapPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<HostStatus>()
            .init_resource::<Bootstrap>()
            .init_resource::<CatalogWindow>()
            .add_systems(Startup, log_startup.after(ConfigLoaded))
            .add_systems(
                Update,
                run_bootstrap_once.run_if(bootstrap_pending.and(host_idle)),
            );
    }
}

fn log_startup(config: Res<AppConfig>) {
    info!(
        "Prefab catalog is starting (project {:?})",
        config.project_root()
    );
}

fn bootstrap_pending(bootstrap: Res<Bootstrap>) -> bool {
    bootstrap.sequencer.state() == BootstrapState::NotStarted
}

fn host_idle(host: Res<HostStatus>) -> bool {
    host.is_idle()
}

fn run_bootstrap_once(
    mut bootstrap: ResMut<Bootstrap>,
    config: Res<AppConfig>,
    mut window: ResMut<CatalogWindow>,
    mut refresh_events: MessageWriter<RefreshCatalog>,
) {
    let workspace = crate::paths::workspace_dir(&config.project_root());
    let bundle = DirBundle::new(crate::paths::bundled_resources_dir());
    debug!("Bundled resources at {:?}", bundle.root());

    match bootstrap.sequencer.run_once(&workspace, &bundle) {
        Ok(report) => {
            for failure in report.failures() {
                warn!("Workspace file missing after bootstrap: {:?}", failure.target);
            }
            bootstrap.last_report = Some(report);
            display_catalog(&mut *window);
            refresh_events.write(RefreshCatalog);
        }
        Err(e) => debug!("Bootstrap skipped: {}", e),
    }
}
