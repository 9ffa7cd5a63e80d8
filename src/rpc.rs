//! EVM JSON-RPC transport.
//!
//! A blocking client for the two read-only methods the pipeline uses:
//! `eth_call` and `eth_estimateGas`. One client is created per resolution
//! and thrown away afterwards; there is no pooling or retry, a failed
//! round trip fails the stage immediately.
//!
//! The error split matters to callers: [`RpcError::Execution`] means the
//! node ran the call and the contract reverted (the message carries the
//! revert reason, which the mutability prober classifies);
//! [`RpcError::Transport`] means the node was never meaningfully reached.

use std::time::Duration;

use serde_json::{json, Value};
use thiserror::Error;
use tracing::debug;

/// Failure of one RPC round trip.
#[derive(Debug, Clone, Error)]
pub enum RpcError {
    /// HTTP or IO failure; the call never executed.
    #[error("transport failure: {0}")]
    Transport(String),
    /// The node executed the call and returned a JSON-RPC error. The
    /// message carries the revert reason when the node knows it.
    #[error("execution failed: {0}")]
    Execution(String),
    /// The node answered with something we could not interpret.
    #[error("malformed node response: {0}")]
    Malformed(String),
}

/// Read-only contract access, as the probers consume it.
///
/// [`RpcClient`] is the production implementation; tests substitute
/// in-memory mocks.
pub trait CallTransport: Sync {
    /// `eth_call` against `to` with 0x-hex calldata; returns 0x-hex
    /// return data.
    fn call(&self, to: &str, data: &str) -> Result<String, RpcError>;

    /// `eth_estimateGas` dry run against `to`. Never submits anything;
    /// a revert surfaces as [`RpcError::Execution`].
    fn estimate_gas(&self, to: &str, data: &str) -> Result<u64, RpcError>;
}

/// Blocking JSON-RPC client for one endpoint.
pub struct RpcClient {
    endpoint: String,
    agent: ureq::Agent,
}

impl RpcClient {
    pub fn new(endpoint: &str, timeout: Duration, connect_timeout: Duration) -> Self {
        Self {
            endpoint: endpoint.to_string(),
            agent: ureq::AgentBuilder::new()
                .timeout(timeout)
                .timeout_connect(connect_timeout)
                .build(),
        }
    }

    fn request(&self, method: &str, params: Value) -> Result<Value, RpcError> {
        let body = json!({
            "jsonrpc": "2.0",
            "id": 1,
            "method": method,
            "params": params,
        });

        let response: Value = match self
            .agent
            .post(&self.endpoint)
            .set("Content-Type", "application/json")
            .send_json(&body)
        {
            Ok(resp) => resp
                .into_json()
                .map_err(|e| RpcError::Malformed(e.to_string()))?,
            // Some nodes report reverts with a non-200 status; the body is
            // still a JSON-RPC error object carrying the reason.
            Err(ureq::Error::Status(code, resp)) => resp
                .into_json()
                .map_err(|_| RpcError::Transport(format!("HTTP {} from {}", code, self.endpoint)))?,
            Err(e) => return Err(RpcError::Transport(e.to_string())),
        };

        if let Some(error) = response.get("error") {
            let message = error
                .get("message")
                .and_then(Value::as_str)
                .unwrap_or("unknown RPC error")
                .to_string();
            debug!(method, %message, "rpc error");
            return Err(RpcError::Execution(message));
        }

        response
            .get("result")
            .cloned()
            .ok_or_else(|| RpcError::Malformed("response has neither result nor error".to_string()))
    }
}

impl CallTransport for RpcClient {
    fn call(&self, to: &str, data: &str) -> Result<String, RpcError> {
        let result = self.request("eth_call", json!([{ "to": to, "data": data }, "latest"]))?;
        result
            .as_str()
            .map(String::from)
            .ok_or_else(|| RpcError::Malformed(format!("eth_call result is not a string: {result}")))
    }

    fn estimate_gas(&self, to: &str, data: &str) -> Result<u64, RpcError> {
        let result = self.request("eth_estimateGas", json!([{ "to": to, "data": data }]))?;
        let hex_gas = result
            .as_str()
            .ok_or_else(|| RpcError::Malformed(format!("gas estimate is not a string: {result}")))?;
        u64::from_str_radix(hex_gas.trim_start_matches("0x"), 16)
            .map_err(|_| RpcError::Malformed(format!("gas estimate is not hex: {hex_gas}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Read, Write};
    use std::net::TcpListener;

    /// Serve exactly one canned HTTP response on a loopback port.
    fn serve_once(status_line: &'static str, body: &'static str) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        std::thread::spawn(move || {
            let (mut stream, _) = listener.accept().unwrap();
            let mut request = [0u8; 4096];
            let _ = stream.read(&mut request);
            let response = format!(
                "HTTP/1.1 {status_line}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                body.len(),
            );
            stream.write_all(response.as_bytes()).unwrap();
        });
        format!("http://{addr}")
    }

    fn client(endpoint: &str) -> RpcClient {
        RpcClient::new(endpoint, Duration::from_secs(5), Duration::from_secs(5))
    }

    #[test]
    fn call_returns_result_string() {
        let endpoint = serve_once("200 OK", r#"{"jsonrpc":"2.0","id":1,"result":"0xabcd"}"#);
        let result = client(&endpoint).call("0x0", "0x06fdde03").unwrap();
        assert_eq!(result, "0xabcd");
    }

    #[test]
    fn error_object_becomes_execution_error() {
        let endpoint = serve_once(
            "200 OK",
            r#"{"jsonrpc":"2.0","id":1,"error":{"code":3,"message":"execution reverted: Ownable: caller is not the owner"}}"#,
        );
        let err = client(&endpoint).estimate_gas("0x0", "0x55f804b3").unwrap_err();
        match err {
            RpcError::Execution(message) => {
                assert!(message.contains("Ownable: caller is not the owner"))
            }
            other => panic!("expected execution error, got {other:?}"),
        }
    }

    #[test]
    fn error_body_under_http_4xx_still_classifies() {
        let endpoint = serve_once(
            "400 Bad Request",
            r#"{"jsonrpc":"2.0","id":1,"error":{"code":-32000,"message":"execution reverted"}}"#,
        );
        let err = client(&endpoint).estimate_gas("0x0", "0x55f804b3").unwrap_err();
        assert!(matches!(err, RpcError::Execution(_)));
    }

    #[test]
    fn gas_estimate_parses_hex_quantity() {
        let endpoint = serve_once("200 OK", r#"{"jsonrpc":"2.0","id":1,"result":"0x5208"}"#);
        let gas = client(&endpoint).estimate_gas("0x0", "0x").unwrap();
        assert_eq!(gas, 21000);
    }

    #[test]
    fn unreachable_endpoint_is_transport_error() {
        // Port 1 on loopback is never listening.
        let err = client("http://127.0.0.1:1").call("0x0", "0x").unwrap_err();
        assert!(matches!(err, RpcError::Transport(_)));
    }
}
