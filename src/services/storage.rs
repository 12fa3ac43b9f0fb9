//! # 本地键值存储服务
//!
//! 订单存储通过 `KeyValueStore` 端口读写持久化数据，不直接接触文件系统：
//! - `FileStore` - 每个键对应数据目录下的一个文件（桌面端和终端的实际存储）
//! - `MemoryStore` - 纯内存存储（测试和临时会话）
//!
//! ## 写入保障
//! `FileStore` 的写入流程：
//! 1. 校验键名，拒绝任何可能被解释为路径的键
//! 2. 如果旧值存在，先复制为 `<key>.bak`，保留上一版本
//! 3. 写入临时文件 `<key>.tmp`，再原子替换为正式文件

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock};

use crate::error::StorageError;
use crate::utils::path;

/// 持久化键值存储端口
///
/// 读写均为同步操作，数据量（订单列表 JSON）很小，不需要异步 I/O。
pub trait KeyValueStore: Send + Sync {
    /// 读取键对应的值；键不存在时返回 `Ok(None)`
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// 写入键值，覆盖旧值
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;
}

/// 基于文件的键值存储
#[derive(Debug, Clone)]
pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    /// 在指定目录上创建存储，目录不存在时递归创建
    pub fn open<P: AsRef<Path>>(root: P) -> Result<Self, StorageError> {
        let root = root.as_ref().to_path_buf();
        fs::create_dir_all(&root)?;
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn key_path(&self, key: &str) -> Result<PathBuf, StorageError> {
        if !path::is_valid_storage_key(key) {
            return Err(StorageError::InvalidKey(key.to_string()));
        }
        Ok(self.root.join(key))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let file = self.key_path(key)?;
        match fs::read_to_string(&file) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let file = self.key_path(key)?;

        if file.exists() {
            fs::copy(&file, self.root.join(format!("{}.bak", key)))?;
        }

        let tmp = self.root.join(format!("{}.tmp", key));
        fs::write(&tmp, value)?;
        fs::rename(&tmp, &file)?;

        log::debug!("已写入存储键 {}（{} 字节）", key, value.len());
        Ok(())
    }
}

/// 内存键值存储
///
/// 克隆得到的句柄共享同一份数据，测试中可以保留一个句柄检查写入结果。
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: Arc<RwLock<HashMap<String, String>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// 使用给定的初始键值创建存储
    pub fn with_entries<I, K, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let map = entries
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();
        Self {
            entries: Arc::new(RwLock::new(map)),
        }
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        // 锁中毒说明另一个线程在持锁时 panic，数据仍可读取
        let entries = self.entries.read().unwrap_or_else(|e| e.into_inner());
        Ok(entries.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut entries = self.entries.write().unwrap_or_else(|e| e.into_inner());
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}
