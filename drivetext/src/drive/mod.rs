mod client;

pub use client::GraphClient;
