pub mod customer;

use serde::{Deserialize, Serialize};
use snowflake::SnowflakeIdGenerator;
use std::{
    error::Error,
    fmt::{Debug, Display},
    ops::Deref,
    str::FromStr,
    sync::Arc,
};
use thiserror::Error;
use tokio::{
    sync::{mpsc, oneshot},
    task::JoinHandle,
};

pub trait Id:
    Copy
    + Eq
    + Deref<Target = Self::Inner>
    + From<Self::Inner>
    + Display
    + Debug
    + Serialize
    + for<'de> Deserialize<'de>
{
    type Inner: FromStr;
}

pub trait Entity: Debug + Clone {
    type Id: Id;

    const ENTITY_NAME: &'static str;

    fn id(&self) -> Self::Id;
}

type BoxError = Box<dyn Error + Send + Sync>;

#[derive(Error, Debug)]
pub enum DataAccessError {
    #[error("Database connection error: {0}")]
    ConnectionError(BoxError),
    #[error("Database query error: {0}")]
    QueryError(BoxError),
    #[error("Data read error: {0}")]
    ReadError(BoxError),
    #[error("Data write error: {0}")]
    WriteError(BoxError),
    #[error("Client side error: {0}")]
    ClientSideError(BoxError),
}

pub struct IdGenerator(SnowflakeIdGenerator);

impl IdGenerator {
    pub fn new(gen: SnowflakeIdGenerator) -> Self {
        Self(gen)
    }

    pub fn generate(&mut self) -> u64 {
        self.0.generate() as u64
    }
}

impl From<SnowflakeIdGenerator> for IdGenerator {
    fn from(value: SnowflakeIdGenerator) -> Self {
        Self::new(value)
    }
}

#[derive(Error, Debug)]
#[error("ID generator task has stopped")]
pub struct IdGeneratorStopped;

/// ID採番タスク
///
/// 採番器を1つのタスクが所有し、チャネル経由で要求を受け付ける。
/// 生成はランタイム内で行うこと。
#[derive(Clone)]
pub struct IdGeneratorTask {
    _handle: Arc<JoinHandle<()>>,
    sender: mpsc::Sender<oneshot::Sender<u64>>,
}

impl IdGeneratorTask {
    pub fn spawn(mut gen: IdGenerator) -> Self {
        let (tx_async, mut rx_async) = mpsc::channel::<oneshot::Sender<u64>>(100);
        let handle = tokio::spawn(async move {
            while let Some(tx) = rx_async.recv().await {
                // 要求元が待たずに去った場合は捨てる
                let _ = tx.send(gen.generate());
            }
        });
        Self {
            _handle: Arc::new(handle),
            sender: tx_async,
        }
    }

    pub async fn generate<T>(&self) -> Result<T, IdGeneratorStopped>
    where
        T: From<u64>,
    {
        let (tx, rx) = oneshot::channel::<u64>();
        self.sender.send(tx).await.map_err(|_| IdGeneratorStopped)?;
        rx.await.map(T::from).map_err(|_| IdGeneratorStopped)
    }
}

impl Debug for IdGeneratorTask {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IdGeneratorTask").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[tokio::test]
    async fn test_generated_ids_are_unique() {
        let task = IdGeneratorTask::spawn(SnowflakeIdGenerator::new(1, 1).into());
        let mut seen = HashSet::new();
        for _ in 0..500 {
            let id: u64 = task.generate().await.unwrap();
            assert!(seen.insert(id));
        }
    }

    #[tokio::test]
    async fn test_generator_is_shared_between_clones() {
        let task = IdGeneratorTask::spawn(SnowflakeIdGenerator::new(1, 1).into());
        let other = task.clone();
        let a: u64 = task.generate().await.unwrap();
        let b: u64 = other.generate().await.unwrap();
        assert_ne!(a, b);
    }
}
