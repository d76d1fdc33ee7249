use std::sync::Arc;

use http::StatusCode;
use tracing::debug;

use crate::error::TransportError;
use crate::http::{KeepAliveClient, RequestTarget};

use super::{CompletionGuard, Outcome, RunConfig, WorkerRecorder, WorkerTally};

/// One sequential request loop with its own connection and result record.
pub(crate) struct Worker {
    id: usize,
    quota: u64,
    config: Arc<RunConfig>,
    recorder: WorkerRecorder,
    client: KeepAliveClient,
    completion: CompletionGuard,
}

impl Worker {
    pub(crate) const fn new(
        id: usize,
        quota: u64,
        config: Arc<RunConfig>,
        recorder: WorkerRecorder,
        client: KeepAliveClient,
        completion: CompletionGuard,
    ) -> Self {
        Self {
            id,
            quota,
            config,
            recorder,
            client,
            completion,
        }
    }

    /// Issues requests until the quota is spent. Failures are counted and the
    /// loop moves straight on to the next attempt.
    pub(crate) async fn run(self) -> WorkerTally {
        let Self {
            id,
            quota,
            config,
            mut recorder,
            mut client,
            completion,
        } = self;
        debug!(worker = id, quota, "worker started");

        while recorder.attempted() < quota {
            let url = config.url_source.next_url();
            if config.print_urls {
                println!("{}", url);
            }

            let result = attempt(&mut client, &config, &url).await;
            if let Err(err) = &result {
                debug!(worker = id, "request to {} failed: {}", url, err);
            }
            recorder.record(Outcome::classify(&result, config.expected_status));
        }

        let tally = recorder.tally();
        drop(client);
        drop(completion);
        debug!(
            worker = id,
            success = tally.success,
            network_failed = tally.network_failed,
            bad_status = tally.bad_status,
            "worker finished"
        );
        tally
    }
}

async fn attempt(
    client: &mut KeepAliveClient,
    config: &RunConfig,
    url: &str,
) -> Result<StatusCode, TransportError> {
    let target = RequestTarget::parse(url).map_err(|err| TransportError::InvalidTarget {
        url: url.to_owned(),
        source: err,
    })?;
    client
        .send(&config.method, &target, config.body.as_ref())
        .await
}
