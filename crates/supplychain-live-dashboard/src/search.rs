/*
[INPUT]:  Lines of search-box text, search target, debounce window
[OUTPUT]: Debounced search requests rendered on the view
[POS]:    Interactive layer - instant search driven from a line stream
[UPDATE]: When changing how typed text turns into search requests
*/

use std::time::Duration;

use anyhow::{Context, Result};
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tokio::time::{sleep_until, Instant};
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use supplychain_live_adapter::{
    DashboardClient, DashboardView, InstantSearch, SearchInput, SearchTarget, TimerQueue,
};

/// Treat every input line as the current search-box contents.
///
/// Lines arriving within `debounce` of each other collapse into one request
/// for the latest text. Pending text is flushed at end of input. Returns the
/// number of requests that produced results.
pub async fn run_instant_search<R, V>(
    client: &DashboardClient,
    view: &V,
    target: SearchTarget,
    debounce: Duration,
    input: R,
    shutdown: CancellationToken,
) -> Result<usize>
where
    R: AsyncBufRead + Unpin,
    V: DashboardView,
{
    let mut search = InstantSearch::new(target, debounce, TimerQueue::new());
    let mut lines = input.lines();
    let mut input_done = false;
    let mut rendered = 0;

    loop {
        let deadline = search.scheduler().next_deadline();
        if input_done && deadline.is_none() {
            break;
        }

        tokio::select! {
            _ = shutdown.cancelled() => break,
            line = lines.next_line(), if !input_done => {
                match line.context("read search input")? {
                    Some(text) => {
                        if search.on_input(&text) == SearchInput::Clear {
                            debug!(%target, "search box cleared");
                        }
                    }
                    None => input_done = true,
                }
            }
            _ = sleep_until_deadline(deadline) => {
                let due = search.scheduler_mut().pop_due(Instant::now());
                for id in due {
                    let Some(query) = search.on_timer(id) else {
                        continue;
                    };
                    match client.search(query.target, &query.query).await {
                        Ok(body) => {
                            view.render_search_results(query.target, &body);
                            rendered += 1;
                        }
                        Err(err) => {
                            warn!(%target, query = %query.query, error = %err, "instant search failed");
                        }
                    }
                }
            }
        }
    }

    Ok(rendered)
}

async fn sleep_until_deadline(deadline: Option<Instant>) {
    match deadline {
        Some(deadline) => sleep_until(deadline).await,
        None => std::future::pending::<()>().await,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;
    use supplychain_live_adapter::{NotificationLevel, OrderStatus, RecordId, TrackingEvent};
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[derive(Default)]
    struct ResultsView {
        results: Mutex<Vec<(SearchTarget, String)>>,
    }

    impl DashboardView for ResultsView {
        fn render_order_status(&self, _: &RecordId, _: OrderStatus) {}
        fn render_stock_level(&self, _: &RecordId, _: i64) {}
        fn render_tracking_event(&self, _: &RecordId, _: &TrackingEvent) {}
        fn show_notification(&self, _: &str, _: NotificationLevel) {}

        fn render_search_results(&self, target: SearchTarget, body: &str) {
            self.results.lock().unwrap().push((target, body.to_string()));
        }
    }

    #[tokio::test]
    async fn burst_of_keystrokes_sends_last_text_only() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/products/"))
            .and(query_param("search", "bolt"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<tr>BOLT-M8</tr>"))
            .expect(1)
            .mount(&server)
            .await;

        let client = DashboardClient::new(&server.uri()).unwrap();
        let view = ResultsView::default();
        let input: &[u8] = b"b\nbo\nbol\nbolt\n";

        let rendered = run_instant_search(
            &client,
            &view,
            SearchTarget::Products,
            Duration::from_millis(50),
            input,
            CancellationToken::new(),
        )
        .await
        .unwrap();

        assert_eq!(rendered, 1);
        assert_eq!(
            *view.results.lock().unwrap(),
            vec![(SearchTarget::Products, "<tr>BOLT-M8</tr>".to_string())]
        );
    }

    #[tokio::test]
    async fn cleared_box_sends_nothing() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let client = DashboardClient::new(&server.uri()).unwrap();
        let view = ResultsView::default();
        let input: &[u8] = b"pend\npending\n\n";

        let rendered = run_instant_search(
            &client,
            &view,
            SearchTarget::Orders,
            Duration::from_millis(50),
            input,
            CancellationToken::new(),
        )
        .await
        .unwrap();

        assert_eq!(rendered, 0);
        assert!(view.results.lock().unwrap().is_empty());
    }
}
