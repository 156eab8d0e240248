//! DB operation interface logic, primarily for generating database operation shims.
//!
//! The macros here manage the indirection required to spawn async requests onto a thread pool
//! and execute blocking calls locally, so that managers never block an async runtime on sled.

use rewards_db_types::DbError;
use thiserror::Error;

/// Handle for receiving a result from a database operation.
pub(crate) type DbRecv<T> = tokio::sync::oneshot::Receiver<Result<T, DbError>>;

/// Errors raised by the dispatch machinery itself rather than the database.
#[derive(Debug, Clone, Error)]
pub(crate) enum OpsError {
    #[error("worker failed strangely")]
    WorkerFailedStrangely,
}

impl From<OpsError> for DbError {
    fn from(value: OpsError) -> Self {
        match value {
            OpsError::WorkerFailedStrangely => DbError::WorkerFailedStrangely,
        }
    }
}

/// Generates a `Context<D>` wrapping a database and an ops struct exposing each listed method in
/// three flavours.
///
/// ```ignore
/// inst_ops_simple! {
///     (<D: BlockCacheDatabase> => BlockCacheOps, component = "storage:block_cache") {
///         get_blocks(address: Address) => Option<Vec<BlockRecord>>;
///         clear_all() => ();
///     }
/// }
/// ```
///
/// For each method `foo(arg: Type) => Ret` the ops struct gets:
/// - `foo_async(&self, arg) -> DbResult<Ret>`, run on the thread pool
/// - `foo_blocking(&self, arg) -> DbResult<Ret>`, run on the calling thread
/// - `foo_chan(&self, arg) -> DbRecv<Ret>`, run on the thread pool with the raw receiver
macro_rules! inst_ops_simple {
    (
        ( < $tparam:ident : $tpconstr:tt > => $base:ident, component = $component:expr )
        {
            $( $iname:ident ( $( $aname:ident : $aty:ty ),* $(,)? ) => $ret:ty; )*
        }
    ) => {
        #[derive(Debug)]
        pub struct Context<$tparam: $tpconstr> {
            db: ::std::sync::Arc<$tparam>,
        }

        impl<$tparam: $tpconstr + Sync + Send + 'static> Context<$tparam> {
            pub fn new(db: ::std::sync::Arc<$tparam>) -> Self {
                Self { db }
            }

            pub fn into_ops(self, pool: ::threadpool::ThreadPool) -> $base {
                $base {
                    pool,
                    inner: ::std::sync::Arc::new(self),
                }
            }
        }

        #[expect(missing_debug_implementations, reason = "the shim object is not Debug")]
        pub struct $base {
            pool: ::threadpool::ThreadPool,
            inner: ::std::sync::Arc<dyn ShimTrait>,
        }

        ::paste::paste! {
            impl $base {
                $(
                    pub async fn [<$iname _async>] (&self, $($aname: $aty),*) -> $crate::exec::DbResult<$ret> {
                        let resp_rx = self.inner. [<$iname _chan>] (&self.pool, $($aname),*);
                        match resp_rx.await {
                            Ok(v) => v,
                            Err(_e) => Err($crate::exec::OpsError::WorkerFailedStrangely.into()),
                        }
                    }

                    pub fn [<$iname _blocking>] (&self, $($aname: $aty),*) -> $crate::exec::DbResult<$ret> {
                        self.inner. [<$iname _blocking>] ($($aname),*)
                    }

                    pub fn [<$iname _chan>] (&self, $($aname: $aty),*) -> $crate::exec::DbRecv<$ret> {
                        self.inner. [<$iname _chan>] (&self.pool, $($aname),*)
                    }
                )*
            }

            trait ShimTrait: Sync + Send + 'static {
                $(
                    fn [<$iname _blocking>] (&self, $($aname: $aty),*) -> $crate::exec::DbResult<$ret>;
                    fn [<$iname _chan>] (&self, pool: &::threadpool::ThreadPool, $($aname: $aty),*) -> $crate::exec::DbRecv<$ret>;
                )*
            }

            impl<$tparam: $tpconstr + Sync + Send + 'static> ShimTrait for Context<$tparam> {
                $(
                    fn [<$iname _blocking>] (&self, $($aname: $aty),*) -> $crate::exec::DbResult<$ret> {
                        let _span = ::tracing::debug_span!(
                            "storage_op",
                            component = $component,
                            op = stringify!($iname),
                        )
                        .entered();
                        self.db.as_ref(). $iname ($($aname),*)
                    }

                    fn [<$iname _chan>] (&self, pool: &::threadpool::ThreadPool, $($aname: $aty),*) -> $crate::exec::DbRecv<$ret> {
                        let (resp_tx, resp_rx) = ::tokio::sync::oneshot::channel();
                        let ctx = Context { db: self.db.clone() };

                        pool.execute(move || {
                            let res = ctx. [<$iname _blocking>] ($($aname),*);
                            if resp_tx.send(res).is_err() {
                                ::tracing::warn!("failed to send response");
                            }
                        });

                        resp_rx
                    }
                )*
            }
        }
    };
}

pub(crate) use inst_ops_simple;
pub(crate) use rewards_db_types::DbResult;
