//! 命名空间读写锁接口
//!
//! 整棵命名空间树由一把读写锁保护。锁作为能力显式传入：
//! 编排层获取守卫，核心函数通过 `&Tree` / `&mut Tree` 借用守卫内的树，
//! 守卫在所有退出路径（包括错误路径）上由 Drop 释放。
//!
//! # 实现
//!
//! - `RefCell<T>` - 单线程环境，重入借用返回 `LockFailed`
//! - `std::sync::RwLock<T>` - 多线程（需要 `std` feature）
//!
//! # 示例
//!
//! ```rust
//! use core::cell::RefCell;
//! use ecpolicy_core::{lock::TreeLock, namespace::InodeTable};
//!
//! let lock = RefCell::new(InodeTable::new());
//! {
//!     let mut tree = lock.acquire_write().unwrap();
//!     tree.mkdir("/data").unwrap();
//! }
//! let tree = lock.acquire_read().unwrap();
//! assert_eq!(tree.len(), 2);
//! ```

use core::cell::{Ref, RefCell, RefMut};
use core::ops::{Deref, DerefMut};

use crate::error::{Error, ErrorKind, Result};

/// 树锁 trait
pub trait TreeLock {
    /// 被保护的树
    type Tree;

    /// 读守卫
    type ReadGuard<'a>: Deref<Target = Self::Tree>
    where
        Self: 'a;

    /// 写守卫
    type WriteGuard<'a>: DerefMut<Target = Self::Tree>
    where
        Self: 'a;

    /// 获取读锁
    fn acquire_read(&self) -> Result<Self::ReadGuard<'_>>;

    /// 获取写锁
    fn acquire_write(&self) -> Result<Self::WriteGuard<'_>>;
}

impl<T> TreeLock for RefCell<T> {
    type Tree = T;
    type ReadGuard<'a> = Ref<'a, T> where Self: 'a;
    type WriteGuard<'a> = RefMut<'a, T> where Self: 'a;

    #[inline]
    fn acquire_read(&self) -> Result<Self::ReadGuard<'_>> {
        self.try_borrow()
            .map_err(|_| Error::new(ErrorKind::LockFailed, "tree is mutably borrowed"))
    }

    #[inline]
    fn acquire_write(&self) -> Result<Self::WriteGuard<'_>> {
        self.try_borrow_mut()
            .map_err(|_| Error::new(ErrorKind::LockFailed, "tree is already borrowed"))
    }
}

#[cfg(feature = "std")]
mod std_locks {
    use super::*;
    use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

    /// RwLock 实现
    ///
    /// 锁中毒（持锁线程 panic）时返回 `LockFailed`。
    impl<T> TreeLock for RwLock<T> {
        type Tree = T;
        type ReadGuard<'a> = RwLockReadGuard<'a, T> where Self: 'a;
        type WriteGuard<'a> = RwLockWriteGuard<'a, T> where Self: 'a;

        fn acquire_read(&self) -> Result<Self::ReadGuard<'_>> {
            self.read().map_err(|_| {
                Error::new(ErrorKind::LockFailed, "Failed to acquire read lock")
            })
        }

        fn acquire_write(&self) -> Result<Self::WriteGuard<'_>> {
            self.write().map_err(|_| {
                Error::new(ErrorKind::LockFailed, "Failed to acquire write lock")
            })
        }
    }
}
