//! Shared utilities for integration testing.
//!
//! Provides a mock HAProxy runtime socket: connection-per-command, reads one
//! command line until the client half-closes, applies it to an in-memory slot
//! table, writes the response, and closes.

use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

/// One slot in the mock load balancer's state table.
#[derive(Debug, Clone)]
pub struct MockSlot {
    pub backend: String,
    pub name: String,
    pub addr: String,
    pub op_state: u32,
    pub admin_state: u32,
    pub age_secs: u64,
}

impl MockSlot {
    pub fn new(backend: &str, name: &str, addr: &str, op: u32, admin: u32, age: u64) -> Self {
        Self {
            backend: backend.to_string(),
            name: name.to_string(),
            addr: addr.to_string(),
            op_state: op,
            admin_state: admin,
            age_secs: age,
        }
    }
}

/// Handle to a running mock runtime socket.
pub struct MockRuntime {
    pub addr: SocketAddr,
    pub slots: Arc<Mutex<Vec<MockSlot>>>,
    pub commands: Arc<Mutex<Vec<String>>>,
}

impl MockRuntime {
    pub fn host(&self) -> String {
        self.addr.ip().to_string()
    }

    pub fn port(&self) -> u16 {
        self.addr.port()
    }

    /// Every command line received so far, oldest first.
    pub fn command_log(&self) -> Vec<String> {
        self.commands.lock().unwrap().clone()
    }

    /// Current copy of a slot by name, if present.
    pub fn slot(&self, name: &str) -> Option<MockSlot> {
        self.slots.lock().unwrap().iter().find(|s| s.name == name).cloned()
    }
}

/// Start a mock runtime socket seeded with `slots`.
pub async fn start_mock_runtime(slots: Vec<MockSlot>) -> MockRuntime {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let slots = Arc::new(Mutex::new(slots));
    let commands: Arc<Mutex<Vec<String>>> = Arc::new(Mutex::new(Vec::new()));

    let task_slots = Arc::clone(&slots);
    let task_commands = Arc::clone(&commands);
    tokio::spawn(async move {
        loop {
            match listener.accept().await {
                Ok((mut socket, _)) => {
                    let slots = Arc::clone(&task_slots);
                    let commands = Arc::clone(&task_commands);
                    tokio::spawn(async move {
                        let mut raw = Vec::new();
                        // Returns once the client half-closes its write side.
                        if socket.read_to_end(&mut raw).await.is_err() {
                            return;
                        }
                        let command = String::from_utf8_lossy(&raw)
                            .trim_end_matches(['\r', '\n'])
                            .to_string();
                        commands.lock().unwrap().push(command.clone());

                        let response = apply_command(&slots, &command);
                        let _ = socket.write_all(response.as_bytes()).await;
                        let _ = socket.shutdown().await;
                    });
                }
                Err(_) => break,
            }
        }
    });

    MockRuntime {
        addr,
        slots,
        commands,
    }
}

/// Start a mock that answers every command with a fixed response.
#[allow(dead_code)]
pub async fn start_canned_runtime(response: &'static str) -> MockRuntime {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let commands: Arc<Mutex<Vec<String>>> = Arc::new(Mutex::new(Vec::new()));

    let task_commands = Arc::clone(&commands);
    tokio::spawn(async move {
        loop {
            match listener.accept().await {
                Ok((mut socket, _)) => {
                    let commands = Arc::clone(&task_commands);
                    tokio::spawn(async move {
                        let mut raw = Vec::new();
                        if socket.read_to_end(&mut raw).await.is_err() {
                            return;
                        }
                        commands.lock().unwrap().push(
                            String::from_utf8_lossy(&raw)
                                .trim_end_matches(['\r', '\n'])
                                .to_string(),
                        );
                        let _ = socket.write_all(response.as_bytes()).await;
                        let _ = socket.shutdown().await;
                    });
                }
                Err(_) => break,
            }
        }
    });

    MockRuntime {
        addr,
        slots: Arc::new(Mutex::new(Vec::new())),
        commands,
    }
}

/// Apply one command to the slot table and produce its response text.
fn apply_command(slots: &Arc<Mutex<Vec<MockSlot>>>, command: &str) -> String {
    let words: Vec<&str> = command.split_whitespace().collect();
    match words.as_slice() {
        ["show", "servers", "state", _backend] => render_state(&slots.lock().unwrap()),
        ["set", "server", target, "addr", ip] => {
            with_slot(slots, target, |slot| slot.addr = ip.to_string());
            "\n".to_string()
        }
        ["set", "server", target, "state", "ready"] => {
            with_slot(slots, target, |slot| {
                slot.admin_state &= !0x01;
                slot.op_state = 2;
                slot.age_secs = 0;
            });
            "\n".to_string()
        }
        ["set", "server", target, "state", "maint"] => {
            with_slot(slots, target, |slot| {
                slot.admin_state |= 0x01;
                slot.age_secs = 0;
            });
            "\n".to_string()
        }
        _ => "Unknown command.\n".to_string(),
    }
}

fn with_slot(slots: &Arc<Mutex<Vec<MockSlot>>>, target: &str, f: impl FnOnce(&mut MockSlot)) {
    let (backend, name) = target.split_once('/').unwrap_or((target, ""));
    let mut slots = slots.lock().unwrap();
    if let Some(slot) = slots
        .iter_mut()
        .find(|s| s.backend == backend && s.name == name)
    {
        f(slot);
    }
}

/// Render the full state dump: preamble, header, one row per slot.
///
/// Data rows carry a leading marker column (the numeric backend id) matching
/// the header's `#` marker.
fn render_state(slots: &[MockSlot]) -> String {
    let mut out = String::from("1\n");
    out.push_str(
        "# be_name srv_name srv_addr srv_op_state srv_admin_state srv_time_since_last_change\n",
    );
    for slot in slots {
        out.push_str(&format!(
            "1 {} {} {} {} {} {}\n",
            slot.backend, slot.name, slot.addr, slot.op_state, slot.admin_state, slot.age_secs
        ));
    }
    out
}
