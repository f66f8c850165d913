mod oracle;
mod rpc;

pub use oracle::JupiterPriceClient;
pub use rpc::RpcClient;
