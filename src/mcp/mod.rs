//! Model Context Protocol (MCP) server implementation.
//!
//! Exposes silkscreen generation as tools to AI assistants. The server
//! speaks JSON-RPC 2.0, one message per line, over stdio.
//!
//! # Architecture
//!
//! ```text
//! ┌───────────────┐    ┌───────────────┐    ┌────────────────────┐
//! │   Transport   │───▶│    Server     │───▶│       Tools        │
//! │ (line framed) │    │  (lifecycle)  │    │ (silkscreen engine)│
//! └───────────────┘    └───────────────┘    └────────────────────┘
//! ```
//!
//! # Protocol Version
//!
//! This implementation targets MCP protocol version 2024-11-05.

pub mod protocol;
pub mod server;
pub mod transport;

pub use protocol::{
    JsonRpcError, JsonRpcRequest, JsonRpcResponse, MCP_PROTOCOL_VERSION, SERVER_NAME,
};
pub use server::{tool_definitions, McpServer, ServerState, ToolCallResult};
pub use transport::{StdioTransport, Transport};
