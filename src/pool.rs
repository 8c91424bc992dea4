use std::sync::Arc;

use crossbeam::queue::ArrayQueue;
use log::trace;

use crate::{DecoderSession, TypeRegistry};

/// Sizing for sessions and the pool that holds them.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SessionConfig {
    /// Bytes reserved up front for copied input.
    pub initial_capacity: usize,
    /// Code units reserved up front for UTF string decoding.
    pub char_scratch_capacity: usize,
    /// Maximum number of idle sessions a [`SessionPool`] keeps. `0` disables pooling.
    pub pool_capacity: usize,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            initial_capacity: 4096,
            char_scratch_capacity: 64,
            pool_capacity: 16,
        }
    }
}

impl SessionConfig {
    pub fn initial_capacity(mut self, bytes: usize) -> Self {
        self.initial_capacity = bytes;
        self
    }

    pub fn char_scratch_capacity(mut self, units: usize) -> Self {
        self.char_scratch_capacity = units;
        self
    }

    pub fn pool_capacity(mut self, sessions: usize) -> Self {
        self.pool_capacity = sessions;
        self
    }
}

/// A bounded pool of idle sessions sharing one registry.
///
/// Sessions move between threads through the pool; a session is only ever used by the
/// thread that acquired it.
pub struct SessionPool<R: TypeRegistry> {
    registry: Arc<R>,
    config: SessionConfig,
    idle: Option<ArrayQueue<DecoderSession<R>>>,
}

impl<R: TypeRegistry> SessionPool<R> {
    /// With a `pool_capacity` of zero every session is created fresh and dropped on return.
    pub fn new(registry: Arc<R>, config: SessionConfig) -> Self {
        let idle = (config.pool_capacity > 0).then(|| ArrayQueue::new(config.pool_capacity));
        Self {
            registry,
            config,
            idle,
        }
    }

    /// Takes an idle session, or creates one when none is available.
    pub fn acquire(&self) -> DecoderSession<R> {
        match self.idle.as_ref().and_then(ArrayQueue::pop) {
            Some(session) => session,
            None => {
                trace!("session pool empty, creating a new session");
                DecoderSession::with_config(Arc::clone(&self.registry), &self.config)
            }
        }
    }

    /// Releases `session` and keeps it for reuse. The session is dropped when the pool is
    /// already full.
    pub fn give_back(&self, mut session: DecoderSession<R>) {
        session.release();
        let Some(idle) = &self.idle else {
            return;
        };
        if idle.push(session).is_err() {
            trace!("session pool full, dropping session");
        }
    }

    /// Number of idle sessions.
    pub fn idle(&self) -> usize {
        self.idle.as_ref().map_or(0, ArrayQueue::len)
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn registry(&self) -> &Arc<R> {
        &self.registry
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::thread;

    use super::{SessionConfig, SessionPool};
    use crate::NamedTypeRegistry;

    fn pool(capacity: usize) -> SessionPool<NamedTypeRegistry<u8>> {
        let registry = NamedTypeRegistry::new();
        registry.register("p.Q", 1);
        SessionPool::new(
            Arc::new(registry),
            SessionConfig::default().pool_capacity(capacity),
        )
    }

    #[test]
    fn returned_sessions_are_reset_and_reused() {
        let pool = pool(2);
        let mut session = pool.acquire();
        session.bind_to_owned_copy(&[1, 2, 3], 0, 3).unwrap();
        session.read_byte().unwrap();
        session.register_type(1);
        pool.give_back(session);
        assert_eq!(pool.idle(), 1);

        let session = pool.acquire();
        assert_eq!(pool.idle(), 0);
        assert_eq!(session.current_position(), 0);
        assert!(session.raw_bytes().is_empty());
        assert!(session.type_cache().is_empty());
    }

    #[test]
    fn full_pool_drops_sessions() {
        let pool = pool(1);
        let a = pool.acquire();
        let b = pool.acquire();
        pool.give_back(a);
        pool.give_back(b);
        assert_eq!(pool.idle(), 1);
    }

    #[test]
    fn zero_capacity_never_retains() {
        let pool = pool(0);
        let mut session = pool.acquire();
        session.bind_to_owned_copy(&[0x05], 0, 1).unwrap();
        assert_eq!(session.read_int().unwrap(), 5);
        pool.give_back(session);
        assert_eq!(pool.idle(), 0);
        assert_eq!(pool.acquire().current_position(), 0);
    }

    #[test]
    fn sessions_cross_threads() {
        let pool = Arc::new(pool(4));
        let handles: Vec<_> = (0u8..4)
            .map(|i| {
                let pool = Arc::clone(&pool);
                thread::spawn(move || {
                    let mut session = pool.acquire();
                    session.bind_to_owned_copy(&[i], 0, 1).unwrap();
                    let v = session.read_int().unwrap();
                    assert_eq!(session.resolve_type_by_name("p.Q").unwrap(), 1);
                    pool.give_back(session);
                    v
                })
            })
            .collect();
        let mut values: Vec<i32> = handles.into_iter().map(|h| h.join().unwrap()).collect();
        values.sort_unstable();
        assert_eq!(values, vec![0, 1, 2, 3]);
        assert!(pool.idle() >= 1);
    }
}
