//! Job records, targets, and the status lifecycle (§3, §4.9, §4.10).

use dt_core::geo::Polygon;
use dt_core::Vec2;
use uuid::Uuid;

// ── JobId ─────────────────────────────────────────────────────────────────────

/// Opaque unique job identifier. Wraps a `uuid::Uuid` rather than the
/// `typed_id!` integer-index pattern used for `AgentId`/`ControllerId`:
/// jobs are created and destroyed by external callers (not indexed into an
/// SoA array), so a UUID is the natural identity, matching the reference
/// job record's `id: uuid.UUID = field(default_factory=uuid.uuid4)`.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct JobId(pub Uuid);

impl JobId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for JobId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for JobId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ── Target ────────────────────────────────────────────────────────────────────

/// The goal region a job asks the flock to reach (§3).
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Target {
    Circle { center: Vec2, radius: Option<f32> },
    Polygon { vertices: Vec<Vec2> },
}

impl Target {
    /// Distance from `p` to the target region: for a circle, distance to
    /// center (or to the boundary when `p` is outside); for a polygon,
    /// distance to the nearest edge. Points already inside the region
    /// return `f32::NEG_INFINITY`, excluding them from candidate-sheep
    /// scoring in the planning policy (§4.8).
    pub fn distance_to(&self, p: Vec2) -> f32 {
        match self {
            Target::Circle { center, radius } => {
                let d = (p - *center).length();
                match radius {
                    None => f32::INFINITY,
                    Some(r) => {
                        if d <= *r {
                            f32::NEG_INFINITY
                        } else {
                            d - r
                        }
                    }
                }
            }
            Target::Polygon { vertices } => match Polygon::new(vertices.clone()) {
                None => f32::INFINITY,
                Some(poly) => {
                    let cp = poly.closest_point(p);
                    if cp.signed_distance <= 0.0 {
                        f32::NEG_INFINITY
                    } else {
                        cp.signed_distance
                    }
                }
            },
        }
    }

    /// `true` iff `p` lies inside the target region (§4.9).
    pub fn contains(&self, p: Vec2) -> bool {
        match self {
            Target::Circle { center, radius } => match radius {
                None => false,
                Some(r) => (p - *center).length() <= *r,
            },
            Target::Polygon { vertices } => {
                Polygon::new(vertices.clone()).is_some_and(|poly| poly.contains(p))
            }
        }
    }

    /// Goal satisfaction (§4.9): every agent position lies inside the
    /// target. An empty flock is trivially satisfied.
    pub fn is_satisfied(&self, positions: &[Vec2]) -> bool {
        positions.iter().all(|&p| self.contains(p))
    }
}

// ── Job status & maintenance ─────────────────────────────────────────────────

/// A job's position in its lifecycle (§3, §4.10).
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum JobStatus {
    Pending,
    Scheduled,
    Running,
    Completed,
    Cancelled,
}

/// How long a `completed` job keeps its goal enforced before being treated
/// as permanently done (§4.10 addendum).
#[derive(Copy, Clone, PartialEq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MaintainUntil {
    /// Never re-arms: once satisfied, stays `completed` forever.
    TargetIsReached,
    /// Re-arms if the goal becomes unsatisfied again before this Unix
    /// timestamp (seconds).
    Timestamp(f64),
}

/// A scheduled or running shepherding objective.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Job {
    pub id: JobId,
    pub target: Option<Target>,
    pub remaining_time: Option<f32>,
    pub is_active: bool,
    pub drones: usize,
    pub status: JobStatus,
    pub start_at: Option<f64>,
    pub completed_at: Option<f64>,
    pub scenario_id: Option<String>,
    pub maintain_until: MaintainUntil,
    pub created_at: f64,
    pub updated_at: f64,
}

impl Job {
    /// Construct a new `pending` job, stamping `created_at`/`updated_at` to
    /// `now`.
    pub fn new(target: Option<Target>, drones: usize, scenario_id: Option<String>, now: f64) -> Self {
        Self {
            id: JobId::new(),
            target,
            remaining_time: None,
            is_active: false,
            drones,
            status: JobStatus::Pending,
            start_at: None,
            completed_at: None,
            scenario_id,
            maintain_until: MaintainUntil::TargetIsReached,
            created_at: now,
            updated_at: now,
        }
    }

    /// §4.10 step 1: promote if `scheduled` and due. Returns `true` if this
    /// job was promoted (caller is responsible for deactivating any other
    /// active job and activating this one).
    pub fn try_promote(&mut self, now: f64) -> bool {
        if self.status != JobStatus::Scheduled {
            return false;
        }
        let due = self.start_at.is_none_or(|t| t <= now);
        if due {
            self.status = JobStatus::Running;
            self.updated_at = now;
        }
        due
    }

    /// §4.10 step 2 + addendum: check goal satisfaction for a `running` or
    /// maintenance-window `completed` job and apply the resulting
    /// transition. `positions` is the current flock snapshot.
    pub fn update_goal_status(&mut self, positions: &[Vec2], now: f64) {
        let Some(target) = &self.target else { return };

        match self.status {
            JobStatus::Running if self.is_active => {
                if target.is_satisfied(positions) {
                    self.status = JobStatus::Completed;
                    self.is_active = false;
                    self.completed_at = Some(now);
                    self.remaining_time = Some(0.0);
                    self.updated_at = now;
                }
            }
            JobStatus::Completed => {
                if let MaintainUntil::Timestamp(deadline) = self.maintain_until {
                    if now < deadline && !target.is_satisfied(positions) {
                        self.status = JobStatus::Running;
                        self.is_active = true;
                        self.completed_at = None;
                        self.updated_at = now;
                    }
                }
            }
            _ => {}
        }
    }

    pub fn cancel(&mut self, now: f64) {
        self.status = JobStatus::Cancelled;
        self.is_active = false;
        self.updated_at = now;
    }
}
