//! In-place topology transforms of a 3-terminal device
//!
//! Each transform expands the grounded 2-port to its 3-port form and reduces
//! it again with a different terminal grounded or loaded.

use super::core::{Network, NetworkError};
use crate::math::transforms::{common_base, common_collector, lift_ground};
use crate::value::ElementValue;

impl Network {
    /// Return the common terminal to ground through `element`
    pub fn lift_ground(&mut self, element: &ElementValue) -> Result<(), NetworkError> {
        let z0 = self.reference_impedance();
        self.map_two_port(|f, s| lift_ground(s, element.impedance_at(f), z0))
    }

    /// Re-wire as common-base
    pub fn to_common_base(&mut self) -> Result<(), NetworkError> {
        self.map_two_port(|_, s| common_base(s))
    }

    /// Re-wire as common-collector
    pub fn to_common_collector(&mut self) -> Result<(), NetworkError> {
        self.map_two_port(|_, s| common_collector(s))
    }
}
