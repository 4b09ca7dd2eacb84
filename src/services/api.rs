use std::collections::{HashSet, VecDeque};
use std::path::PathBuf;
use tokio::sync::mpsc;
use tokio::time::{interval, Duration};

use crate::api::{
    ApiClient, ApiError, PredictionResponse, RegisteredUser, ReportData, TokenResponse,
    UserProfile,
};
use crate::logic::export;

/// Priority level for API requests
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Priority {
    High,   // User-initiated actions (login, upload, delete, export)
    Medium, // Reads that refresh what is on screen
}

/// Unique identifier for deduplicating requests
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub(crate) enum RequestKey {
    User { user_id: String },
    Report { report_id: String },
    /// Writes never deduplicate; each gets a fresh sequence number
    Write(u64),
}

/// API request types
#[derive(Debug, Clone)]
pub enum ApiRequest {
    Login { login: String, password: String },

    Register { login: String, password: String },

    /// Load the user profile and version list
    LoadUser {
        user_id: String,
        /// Select and fetch the newest version once loaded; otherwise keep the selection
        select_newest: bool,
    },

    FetchReport { report_id: String },

    /// Upload a CSV and fetch the report it produced
    UploadReport { path: PathBuf },

    DeleteReport { report_id: String },

    /// Download a version as CSV into `dir`
    ExportReport {
        report_id: String,
        label: String,
        dir: PathBuf,
    },

    PredictOne { text: String },

    PredictMetrics { path: PathBuf },
}

impl ApiRequest {
    fn priority(&self) -> Priority {
        match self {
            ApiRequest::LoadUser { .. } | ApiRequest::FetchReport { .. } => Priority::Medium,
            _ => Priority::High,
        }
    }

    /// Key for deduplication; reads with the same target share one
    fn key(&self, sequence: u64) -> RequestKey {
        match self {
            ApiRequest::LoadUser { user_id, .. } => RequestKey::User {
                user_id: user_id.clone(),
            },
            ApiRequest::FetchReport { report_id } => RequestKey::Report {
                report_id: report_id.clone(),
            },
            _ => RequestKey::Write(sequence),
        }
    }
}

/// API response types
#[derive(Debug)]
pub enum ApiResponse {
    LoginResult {
        login: String,
        result: Result<TokenResponse, ApiError>,
    },

    RegisterResult {
        login: String,
        result: Result<RegisteredUser, ApiError>,
    },

    UserResult {
        user_id: String,
        select_newest: bool,
        result: Result<UserProfile, ApiError>,
    },

    ReportResult {
        report_id: String,
        result: Result<ReportData, ApiError>,
    },

    UploadResult {
        result: Result<ReportData, ApiError>,
    },

    DeleteResult {
        report_id: String,
        result: Result<(), ApiError>,
    },

    ExportResult {
        report_id: String,
        result: anyhow::Result<PathBuf>,
    },

    PredictionResult {
        text: String,
        result: Result<PredictionResponse, ApiError>,
    },

    MetricsResult {
        result: Result<serde_json::Value, ApiError>,
    },
}

/// Internal message for tracking completed requests
pub(crate) enum InternalMessage {
    Completed(RequestKey),
}

/// API service worker that processes requests in the background
pub struct ApiService {
    client: ApiClient,
    request_queue: VecDeque<(ApiRequest, RequestKey, Priority)>,
    in_flight: HashSet<RequestKey>,
    response_tx: mpsc::UnboundedSender<ApiResponse>,
    completion_tx: mpsc::UnboundedSender<InternalMessage>,
    max_concurrent: usize,
    next_sequence: u64,
}

impl ApiService {
    pub(crate) fn new(
        client: ApiClient,
        response_tx: mpsc::UnboundedSender<ApiResponse>,
        completion_tx: mpsc::UnboundedSender<InternalMessage>,
    ) -> Self {
        Self {
            client,
            request_queue: VecDeque::new(),
            in_flight: HashSet::new(),
            response_tx,
            completion_tx,
            max_concurrent: 10, // Limit concurrent API calls
            next_sequence: 0,
        }
    }

    /// Add a request to the queue, dropping reads already queued or in flight
    fn enqueue(&mut self, request: ApiRequest) {
        let key = request.key(self.next_sequence);
        self.next_sequence += 1;

        let queued = self.request_queue.iter().any(|(_, k, _)| *k == key);
        if queued || self.in_flight.contains(&key) {
            tracing::debug!("Dropping duplicate request {:?}", key);
            return;
        }

        let priority = request.priority();

        // Insert based on priority (high priority at front)
        let insert_pos = self
            .request_queue
            .iter()
            .position(|(_, _, p)| *p > priority)
            .unwrap_or(self.request_queue.len());

        self.request_queue.insert(insert_pos, (request, key, priority));
    }

    /// Process the next request from the queue
    fn process_next(&mut self) {
        if self.in_flight.len() >= self.max_concurrent {
            return; // At capacity, wait for some to complete
        }

        let Some((request, key, _)) = self.request_queue.pop_front() else {
            return;
        };

        self.in_flight.insert(key.clone());

        let client = self.client.clone();
        let response_tx = self.response_tx.clone();
        let completion_tx = self.completion_tx.clone();

        tokio::spawn(async move {
            let response = Self::execute_request(&client, request).await;
            let _ = response_tx.send(response);
            let _ = completion_tx.send(InternalMessage::Completed(key));
        });
    }

    /// Execute an API request and return the response
    async fn execute_request(client: &ApiClient, request: ApiRequest) -> ApiResponse {
        match request {
            ApiRequest::Login { login, password } => {
                let result = client.login(&login, &password).await;
                ApiResponse::LoginResult { login, result }
            }

            ApiRequest::Register { login, password } => {
                let result = client.register(&login, &password).await;
                ApiResponse::RegisterResult { login, result }
            }

            ApiRequest::LoadUser {
                user_id,
                select_newest,
            } => {
                let result = client.get_user(&user_id).await;
                ApiResponse::UserResult {
                    user_id,
                    select_newest,
                    result,
                }
            }

            ApiRequest::FetchReport { report_id } => {
                tracing::debug!("Fetching report {}", report_id);
                let result = client.fetch_report(&report_id).await;
                ApiResponse::ReportResult { report_id, result }
            }

            ApiRequest::UploadReport { path } => {
                tracing::info!("Uploading {}", path.display());
                let result = client.upload_report(&path).await;
                ApiResponse::UploadResult { result }
            }

            ApiRequest::DeleteReport { report_id } => {
                let result = client.delete_report(&report_id).await;
                ApiResponse::DeleteResult { report_id, result }
            }

            ApiRequest::ExportReport {
                report_id,
                label,
                dir,
            } => {
                let result = match client.download_report_csv(&report_id).await {
                    Ok(bytes) => export::write_export(&dir, &label, &bytes),
                    Err(e) => Err(e.into()),
                };
                ApiResponse::ExportResult { report_id, result }
            }

            ApiRequest::PredictOne { text } => {
                let result = client.predict_one(&text).await;
                ApiResponse::PredictionResult { text, result }
            }

            ApiRequest::PredictMetrics { path } => {
                let result = client.predict_metrics(&path).await;
                ApiResponse::MetricsResult { result }
            }
        }
    }
}

/// Spawn the API service worker
pub fn spawn_api_service(
    client: ApiClient,
) -> (
    mpsc::UnboundedSender<ApiRequest>,
    mpsc::UnboundedReceiver<ApiResponse>,
) {
    let (request_tx, mut request_rx) = mpsc::unbounded_channel::<ApiRequest>();
    let (response_tx, response_rx) = mpsc::unbounded_channel::<ApiResponse>();
    let (completion_tx, mut completion_rx) = mpsc::unbounded_channel::<InternalMessage>();

    tokio::spawn(async move {
        let mut service = ApiService::new(client, response_tx, completion_tx);

        // Ticker for processing queue
        let mut tick = interval(Duration::from_millis(10));

        loop {
            tokio::select! {
                maybe_request = request_rx.recv() => {
                    match maybe_request {
                        Some(request) => service.enqueue(request),
                        None => {
                            tracing::debug!("API request channel closed, stopping worker");
                            break;
                        }
                    }
                }

                Some(InternalMessage::Completed(key)) = completion_rx.recv() => {
                    service.in_flight.remove(&key);
                }

                _ = tick.tick() => {
                    // Process multiple requests per tick if queue has items
                    for _ in 0..5 {
                        if service.request_queue.is_empty() {
                            break;
                        }
                        service.process_next();
                    }
                }
            }
        }
    });

    (request_tx, response_rx)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service() -> ApiService {
        let client = ApiClient::new("http://127.0.0.1:1", Duration::from_secs(1)).unwrap();
        let (response_tx, _response_rx) = mpsc::unbounded_channel();
        let (completion_tx, _completion_rx) = mpsc::unbounded_channel();
        ApiService::new(client, response_tx, completion_tx)
    }

    #[test]
    fn test_reads_are_deduplicated() {
        let mut service = service();
        service.enqueue(ApiRequest::FetchReport {
            report_id: "r1".to_string(),
        });
        service.enqueue(ApiRequest::FetchReport {
            report_id: "r1".to_string(),
        });
        service.enqueue(ApiRequest::FetchReport {
            report_id: "r2".to_string(),
        });

        assert_eq!(service.request_queue.len(), 2);
    }

    #[test]
    fn test_writes_are_never_deduplicated() {
        let mut service = service();
        for _ in 0..2 {
            service.enqueue(ApiRequest::DeleteReport {
                report_id: "r1".to_string(),
            });
        }

        assert_eq!(service.request_queue.len(), 2);
    }

    #[test]
    fn test_high_priority_jumps_reads() {
        let mut service = service();
        service.enqueue(ApiRequest::FetchReport {
            report_id: "r1".to_string(),
        });
        service.enqueue(ApiRequest::PredictOne {
            text: "hi".to_string(),
        });

        let (first, _, priority) = &service.request_queue[0];
        assert_eq!(*priority, Priority::High);
        assert!(matches!(first, ApiRequest::PredictOne { .. }));
    }

    #[test]
    fn test_in_flight_read_is_dropped() {
        let mut service = service();
        service.in_flight.insert(RequestKey::User {
            user_id: "u1".to_string(),
        });
        service.enqueue(ApiRequest::LoadUser {
            user_id: "u1".to_string(),
            select_newest: true,
        });

        assert!(service.request_queue.is_empty());
    }
}
