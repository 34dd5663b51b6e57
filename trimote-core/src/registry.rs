//! Registered radio peers
//!
//! Registration order assigns device ids: the first peer registered is
//! device 1. Ids are never reused or reordered.

use heapless::Vec;
use trimote_protocol::{DeviceId, MacAddr, MacText};

use crate::config::MAX_PEERS;

/// Errors registering a peer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RegistryError {
    /// All peer slots are taken
    Full,
    /// Address already registered
    Duplicate,
}

/// Ordered peer address table
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PeerRegistry {
    peers: Vec<MacAddr, MAX_PEERS>,
}

impl PeerRegistry {
    pub const fn new() -> Self {
        Self { peers: Vec::new() }
    }

    /// Register an address and return the id it is addressed by
    pub fn register(&mut self, mac: MacAddr) -> Result<DeviceId, RegistryError> {
        if self.peers.contains(&mac) {
            return Err(RegistryError::Duplicate);
        }
        let index = self.peers.len() as u8;
        self.peers.push(mac).map_err(|_| RegistryError::Full)?;
        DeviceId::from_index(index).ok_or(RegistryError::Full)
    }

    /// Address registered under `id`
    pub fn get(&self, id: DeviceId) -> Option<&MacAddr> {
        self.peers.get(id.index())
    }

    /// Returns true if `id` addresses a registered peer
    pub fn contains(&self, id: DeviceId) -> bool {
        id.index() < self.peers.len()
    }

    pub fn len(&self) -> usize {
        self.peers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.peers.is_empty()
    }

    /// Peers in id order
    pub fn iter(&self) -> impl Iterator<Item = (DeviceId, &MacAddr)> {
        self.peers
            .iter()
            .enumerate()
            .filter_map(|(i, mac)| DeviceId::from_index(i as u8).map(|id| (id, mac)))
    }

    /// Display text for every slot; unregistered slots are blank
    pub fn address_texts(&self) -> [MacText; MAX_PEERS] {
        core::array::from_fn(|i| {
            self.peers
                .get(i)
                .map(MacAddr::to_text)
                .unwrap_or_default()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DEFAULT_PEERS;

    #[test]
    fn test_ids_follow_registration_order() {
        let mut registry = PeerRegistry::new();
        for (i, mac) in DEFAULT_PEERS.iter().enumerate() {
            let id = registry.register(*mac).unwrap();
            assert_eq!(id.get() as usize, i + 1);
        }

        let id2 = DeviceId::new(2).unwrap();
        assert_eq!(registry.get(id2), Some(&DEFAULT_PEERS[1]));
        assert!(registry.contains(id2));
    }

    #[test]
    fn test_register_beyond_capacity() {
        let mut registry = PeerRegistry::new();
        for mac in DEFAULT_PEERS {
            registry.register(mac).unwrap();
        }
        let extra = MacAddr::new([2, 0, 0, 0, 0, 1]);
        assert_eq!(registry.register(extra), Err(RegistryError::Full));
        assert_eq!(registry.len(), MAX_PEERS);
    }

    #[test]
    fn test_duplicate_rejected() {
        let mut registry = PeerRegistry::new();
        registry.register(DEFAULT_PEERS[0]).unwrap();
        assert_eq!(
            registry.register(DEFAULT_PEERS[0]),
            Err(RegistryError::Duplicate)
        );
    }

    #[test]
    fn test_unregistered_id() {
        let mut registry = PeerRegistry::new();
        registry.register(DEFAULT_PEERS[0]).unwrap();
        let id3 = DeviceId::new(3).unwrap();
        assert!(registry.get(id3).is_none());
        assert!(!registry.contains(id3));
    }

    #[test]
    fn test_address_texts() {
        let mut registry = PeerRegistry::new();
        registry.register(DEFAULT_PEERS[1]).unwrap();
        let texts = registry.address_texts();
        assert_eq!(texts[0].as_str(), "98:A3:16:8F:7B:20");
        assert!(texts[1].is_empty());
        assert!(texts[2].is_empty());
    }

    #[test]
    fn test_iter_pairs_ids_with_addresses() {
        let mut registry = PeerRegistry::new();
        registry.register(DEFAULT_PEERS[0]).unwrap();
        registry.register(DEFAULT_PEERS[2]).unwrap();

        let mut iter = registry.iter();
        let (id, mac) = iter.next().unwrap();
        assert_eq!((id.get(), *mac), (1, DEFAULT_PEERS[0]));
        let (id, mac) = iter.next().unwrap();
        assert_eq!((id.get(), *mac), (2, DEFAULT_PEERS[2]));
        assert!(iter.next().is_none());
    }
}
