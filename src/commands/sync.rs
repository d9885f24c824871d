//! Main sync command

use crate::compare::{ChecksumComparator, Comparator};
use crate::logging::SyncLog;
use crate::sync::Synchronizer;
use crate::types::PassStats;
use crate::Config;
use std::thread;
use std::time::Duration;

/// Run `config.count` passes, `config.interval` apart.
///
/// The replica must already exist (see [`Config::prepare`]). Returns the
/// stats of every pass in order.
pub fn run<L: SyncLog>(config: &Config, log: L) -> Vec<PassStats> {
    let comparator = ChecksumComparator::new(config.hash);
    let sync = Synchronizer::new(&config.source, &config.replica, comparator, log);
    run_cycles(&sync, config.count, config.interval, thread::sleep)
}

/// Cycle loop with an injectable sleep. No sleep follows the last pass.
pub fn run_cycles<C, L, S>(
    sync: &Synchronizer<C, L>,
    count: u64,
    interval: Duration,
    mut sleep: S,
) -> Vec<PassStats>
where
    C: Comparator,
    L: SyncLog,
    S: FnMut(Duration),
{
    let mut history = Vec::new();

    for cycle in 1..=count {
        sync.log()
            .info(&format!("Starting synchronization cycle {cycle} of {count}"));

        let stats = sync.run();
        sync.log().info(&format!(
            "Finished synchronization cycle {cycle} of {count}: {}",
            stats.summary()
        ));
        history.push(stats);

        if cycle < count {
            sleep(interval);
        }
    }

    history
}
