mod common;

use axum::http::StatusCode;
use common::{get, test_router};
use dad_service::services::MockContentStore;
use mongodb::bson::doc;
use std::io::Write;
use std::sync::{Arc, Mutex};
use tracing::Level;

#[derive(Clone, Default)]
struct CapturedLog(Arc<Mutex<Vec<u8>>>);

impl CapturedLog {
    fn contents(&self) -> String {
        String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
    }
}

impl Write for CapturedLog {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

#[tokio::test]
async fn every_response_is_logged_at_info() {
    let log = CapturedLog::default();
    let writer = log.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_max_level(Level::INFO)
        .with_ansi(false)
        .with_writer(move || writer.clone())
        .finish();
    let _guard = tracing::subscriber::set_default(subscriber);

    let app = test_router(Arc::new(MockContentStore::new(vec![
        doc! { "type": "joke", "text": "A" },
    ])));
    let response = get(&app, "/joke").await;
    assert_eq!(response.status, StatusCode::OK);

    let output = log.contents();
    assert!(output.contains("finished processing request"), "{}", output);
    assert!(output.contains("uri=/joke"), "{}", output);
}
