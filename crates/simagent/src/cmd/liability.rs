use serde_json::Value;
use simagent_client::{
    CancelToken, Client, ClientConfig, ClientError, Endpoint, Message, MessageHandler,
    MessageWriter, PumpExit,
};
use tracing::{info, warn};

use crate::cmd::LiabilityArgs;
use crate::exit::{client_error, CliError, CliResult, FAILURE, SUCCESS};
use crate::output::{print_report, LiabilityReport, OutputFormat};

/// Message type: liability request.
pub const LIABILITY: i64 = 2;
/// Message type: liability exchange finished.
pub const LIABILITY_FINISH: i64 = 3;

struct LiabilityHandler {
    cancel: CancelToken,
    measurements: Option<Value>,
}

impl MessageHandler for LiabilityHandler {
    fn on_message(
        &mut self,
        _outbound: &mut MessageWriter,
        message: Message,
    ) -> simagent_client::Result<()> {
        match message.msg_type {
            LIABILITY_FINISH => {
                info!("liability exchange finished");
                self.measurements = message.field("measurements").cloned();
                self.cancel.cancel();
            }
            other => warn!(msg_type = other, "ignoring unexpected message"),
        }
        Ok(())
    }
}

fn liability_request(drone: &str, contract: &str) -> Message {
    Message::new(LIABILITY)
        .with_field("drone", drone)
        .with_field("contract", contract)
}

pub fn run(args: LiabilityArgs, format: OutputFormat) -> CliResult<i32> {
    let endpoint: Endpoint = args
        .endpoint
        .parse()
        .map_err(|err| client_error("invalid endpoint", err))?;

    let mut client = Client::new(endpoint, ClientConfig::default());
    install_ctrlc_handler(client.cancel_token())?;

    match client.connect() {
        Ok(()) => {}
        Err(ClientError::Cancelled) => return Ok(SUCCESS),
        Err(err) => return Err(client_error("connect failed", err)),
    }

    client
        .send(&liability_request(&args.drone, &args.contract))
        .map_err(|err| client_error("request send failed", err))?;

    let mut handler = LiabilityHandler {
        cancel: client.cancel_token(),
        measurements: None,
    };
    let exit = client
        .read_loop(&mut handler)
        .map_err(|err| client_error("session failed", err))?;
    client.disconnect();

    match (handler.measurements, exit) {
        (Some(measurements), _) => {
            print_report(
                &LiabilityReport::new(&args.drone, &args.contract, &measurements),
                format,
            );
            Ok(SUCCESS)
        }
        (None, PumpExit::Cancelled) => Err(CliError::new(
            FAILURE,
            "interrupted before the exchange finished",
        )),
        (None, PumpExit::Closed) => Err(CliError::new(
            FAILURE,
            "server closed the connection before finishing the exchange",
        )),
    }
}

fn install_ctrlc_handler(cancel: CancelToken) -> CliResult<()> {
    ctrlc::set_handler(move || {
        cancel.cancel();
    })
    .map_err(|err| {
        CliError::new(
            crate::exit::INTERNAL,
            format!("signal handler setup failed: {err}"),
        )
    })
}

#[cfg(test)]
mod tests {
    use std::net::{TcpListener, TcpStream};

    use simagent_frame::FrameWriter;

    use super::*;

    fn loopback_writer() -> (MessageWriter, TcpStream) {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        let stream = TcpStream::connect(addr).unwrap();
        let (server_side, _addr) = listener.accept().unwrap();
        (MessageWriter::new(FrameWriter::new(stream)), server_side)
    }

    #[test]
    fn request_payload_shape() {
        let request = liability_request("salvor", "toxic_accident");
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "type": 2,
                "drone": "salvor",
                "contract": "toxic_accident",
            })
        );
    }

    #[test]
    fn finish_message_captures_measurements_and_cancels() {
        let (mut writer, _server) = loopback_writer();
        let cancel = CancelToken::new();
        let mut handler = LiabilityHandler {
            cancel: cancel.clone(),
            measurements: None,
        };

        let finish = Message::new(LIABILITY_FINISH)
            .with_field("measurements", serde_json::json!([1, 2, 3]));
        handler.on_message(&mut writer, finish).unwrap();

        assert_eq!(handler.measurements, Some(serde_json::json!([1, 2, 3])));
        assert!(cancel.is_cancelled());
    }

    #[test]
    fn unexpected_message_is_ignored() {
        let (mut writer, _server) = loopback_writer();
        let cancel = CancelToken::new();
        let mut handler = LiabilityHandler {
            cancel: cancel.clone(),
            measurements: None,
        };

        handler
            .on_message(&mut writer, Message::new(99).with_field("x", 1))
            .unwrap();

        assert!(handler.measurements.is_none());
        assert!(!cancel.is_cancelled());
    }
}
