use std::path::{Path, PathBuf};
use std::sync::mpsc::{Receiver, channel};

use orrery_scene::{WorldFile, build_world};
use raylib::prelude::*;

use super::App;

impl App {
    /// Watches the world file when `enabled`; the receiver sees one `()` per change.
    pub(crate) fn spawn_world_watcher(path: &Path, enabled: bool) -> Receiver<()> {
        let (tx, rx) = channel::<()>();
        if !enabled {
            return rx;
        }
        let path: PathBuf = path.to_path_buf();
        std::thread::spawn(move || {
            use notify::{EventKind, RecursiveMode, Watcher};
            let watcher = notify::recommended_watcher(move |res: Result<notify::Event, notify::Error>| {
                if let Ok(event) = res {
                    match event.kind {
                        EventKind::Modify(_) | EventKind::Create(_) | EventKind::Any => {
                            let _ = tx.send(());
                        }
                        _ => {}
                    }
                }
            });
            match watcher {
                Ok(mut watcher) => {
                    if let Err(e) = watcher.watch(&path, RecursiveMode::NonRecursive) {
                        log::warn!("cannot watch {}: {}", path.display(), e);
                        return;
                    }
                    log::info!("watching {} for changes", path.display());
                    loop {
                        std::thread::sleep(std::time::Duration::from_secs(3600));
                    }
                }
                Err(e) => log::warn!("file watcher unavailable: {}", e),
            }
        });
        rx
    }

    /// Reloads the world after the watcher fired. A broken file keeps the current world.
    pub(crate) fn process_world_events(&mut self, rl: &mut RaylibHandle, thread: &RaylibThread) {
        // editors often write several events per save
        if self.world_event_rx.try_iter().count() == 0 {
            return;
        }
        let file = match WorldFile::from_path(&self.world_path) {
            Ok(file) => file,
            Err(e) => {
                log::warn!("world reload skipped: {}", e);
                return;
            }
        };
        let world = build_world(&file);
        for dropped in &world.report.dropped {
            log::warn!("reload dropped {}: {}", dropped.path, dropped.reason);
        }
        self.sim.reload(world);
        self.renderer.prepare(rl, thread, self.sim.scene());
    }
}
