//! Scripted transport for exercising the client without a browser.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

use super::client::{ApiClient, ApiError, PreparedRequest, RawResponse, StatusCode, Transport};
use crate::config::AppConfig;

#[derive(Clone, Default)]
pub struct StubTransport {
    replies: Rc<RefCell<VecDeque<Result<RawResponse, ApiError>>>>,
    seen: Rc<RefCell<Vec<PreparedRequest>>>,
}

impl StubTransport {
    pub fn reply(&self, status: u16, body: &str) -> &Self {
        let status = StatusCode::from_u16(status).expect("valid status code");
        self.replies.borrow_mut().push_back(Ok(RawResponse { status, body: body.to_owned() }));
        self
    }

    pub fn fail(&self, error: ApiError) -> &Self {
        self.replies.borrow_mut().push_back(Err(error));
        self
    }

    pub fn requests(&self) -> Vec<PreparedRequest> {
        self.seen.borrow().clone()
    }

    pub fn last_request(&self) -> PreparedRequest {
        self.seen.borrow().last().cloned().expect("no request was sent")
    }
}

impl Transport for StubTransport {
    async fn send(&self, request: PreparedRequest) -> Result<RawResponse, ApiError> {
        self.seen.borrow_mut().push(request);
        self.replies
            .borrow_mut()
            .pop_front()
            .unwrap_or_else(|| Err(ApiError::Transport("no scripted reply".to_owned())))
    }
}

pub fn stub_client() -> (ApiClient<StubTransport>, StubTransport) {
    let transport = StubTransport::default();
    let client = ApiClient::with_transport(&AppConfig::default(), transport.clone());
    (client, transport)
}
