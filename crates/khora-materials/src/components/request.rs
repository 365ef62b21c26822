// Copyright 2025 eraflo
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use std::time::Duration;

use crate::error::MaterialError;

/// Where a material request is in its load.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum RequestStatus {
    /// Created, not yet picked up by a loader.
    #[default]
    Submitted,
    /// A loader is resolving the address.
    Loading,
    /// The material record has been attached. Terminal.
    Loaded,
    /// The address could not be resolved in time. Terminal.
    NotFound,
}

impl RequestStatus {
    /// Returns `true` for `Loaded` and `NotFound`.
    pub const fn is_finished(&self) -> bool {
        matches!(self, Self::Loaded | Self::NotFound)
    }

    fn can_become(self, next: RequestStatus) -> bool {
        matches!(
            (self, next),
            (Self::Submitted, Self::Loading)
                | (Self::Submitted, Self::NotFound)
                | (Self::Loading, Self::Loaded)
                | (Self::Loading, Self::NotFound)
        )
    }
}

/// A pending load of a material from an address.
///
/// Lives on the material entity next to its binding table. The status only
/// moves forward; see [`RequestStatus`] for the terminal states.
#[derive(Debug, Clone, PartialEq)]
pub struct MaterialRequest {
    address: String,
    timeout: Duration,
    elapsed: Duration,
    status: RequestStatus,
}

impl MaterialRequest {
    /// Creates a submitted request. A zero `timeout` never expires.
    pub fn new(address: impl Into<String>, timeout: Duration) -> Self {
        Self {
            address: address.into(),
            timeout,
            elapsed: Duration::ZERO,
            status: RequestStatus::Submitted,
        }
    }

    /// The address the material is loaded from.
    pub fn address(&self) -> &str {
        &self.address
    }

    /// How long the request may stay unresolved.
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Time spent since submission, as reported through [`advance`](Self::advance).
    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    /// The current status.
    pub fn status(&self) -> RequestStatus {
        self.status
    }

    /// Returns `true` once the request reached a terminal status.
    pub fn is_finished(&self) -> bool {
        self.status.is_finished()
    }

    /// Submitted → Loading.
    pub fn begin_loading(&mut self) -> Result<(), MaterialError> {
        self.transition(RequestStatus::Loading)
    }

    /// Loading → Loaded.
    pub fn complete(&mut self) -> Result<(), MaterialError> {
        self.transition(RequestStatus::Loaded)
    }

    /// Submitted or Loading → NotFound.
    pub fn fail(&mut self) -> Result<(), MaterialError> {
        self.transition(RequestStatus::NotFound)
    }

    /// Adds `delta` to the elapsed time and returns `true` if the timeout is
    /// now exceeded.
    pub fn advance(&mut self, delta: Duration) -> bool {
        self.elapsed = self.elapsed.saturating_add(delta);
        self.is_expired()
    }

    /// Returns `true` if a non-zero timeout has been exceeded.
    pub fn is_expired(&self) -> bool {
        !self.timeout.is_zero() && self.elapsed > self.timeout
    }

    fn transition(&mut self, next: RequestStatus) -> Result<(), MaterialError> {
        if !self.status.can_become(next) {
            return Err(MaterialError::InvalidTransition {
                from: self.status,
                to: next,
            });
        }
        log::debug!(
            "Material request '{}': {:?} -> {:?}",
            self.address,
            self.status,
            next
        );
        self.status = next;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_happy_path() {
        let mut request = MaterialRequest::new("materials/brick.json", Duration::from_secs(1));
        assert_eq!(request.status(), RequestStatus::Submitted);

        request.begin_loading().unwrap();
        request.complete().unwrap();
        assert_eq!(request.status(), RequestStatus::Loaded);
        assert!(request.is_finished());
    }

    #[test]
    fn test_rejection_before_loading() {
        let mut request = MaterialRequest::new("missing", Duration::ZERO);
        request.fail().unwrap();
        assert_eq!(request.status(), RequestStatus::NotFound);
    }

    #[test]
    fn test_terminal_states_reject_transitions() {
        let mut request = MaterialRequest::new("a", Duration::ZERO);
        request.begin_loading().unwrap();
        request.complete().unwrap();

        let err = request.begin_loading().unwrap_err();
        assert!(matches!(
            err,
            MaterialError::InvalidTransition {
                from: RequestStatus::Loaded,
                to: RequestStatus::Loading,
            }
        ));
        assert!(request.fail().is_err());
        assert_eq!(request.status(), RequestStatus::Loaded);
    }

    #[test]
    fn test_cannot_complete_without_loading() {
        let mut request = MaterialRequest::new("a", Duration::ZERO);
        assert!(request.complete().is_err());
        assert_eq!(request.status(), RequestStatus::Submitted);
    }

    #[test]
    fn test_zero_timeout_never_expires() {
        let mut request = MaterialRequest::new("a", Duration::ZERO);
        assert!(!request.advance(Duration::from_secs(3600)));
        assert!(!request.is_expired());
    }

    #[test]
    fn test_timeout_expires_after_exceeding() {
        let mut request = MaterialRequest::new("a", Duration::from_millis(100));
        assert!(!request.advance(Duration::from_millis(60)));
        assert!(!request.advance(Duration::from_millis(40)));
        assert!(request.advance(Duration::from_millis(1)));
        assert_eq!(request.elapsed(), Duration::from_millis(101));
    }
}
