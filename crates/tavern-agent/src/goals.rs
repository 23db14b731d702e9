//! Goals, plans, and the hierarchy that arbitrates between them.
//!
//! Grounded on `goals.py`: a [`Goal`] sits in a small state machine
//! (PENDING -> ACTIVE -> {ACHIEVED, FAILED, ABANDONED}, with ACTIVE <->
//! BLOCKED reversible); a [`Plan`] is an ordered, cursor-driven sequence of
//! [`Action`]s bound to exactly one goal; [`GoalHierarchy`] owns both stores
//! plus which goal/plan is currently active, and is the only thing in
//! `tavern-agent` that performs goal-urgency arbitration (§A.4.1 step 5).

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tavern_types::{Action, GoalId, GoalKind, GoalStatus, PlanId};

/// One node in an agent's goal tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Goal {
    /// Stable identifier.
    pub goal_id: GoalId,
    /// Human-readable description; goal-by-need/drive templates embed a
    /// fixed keyword the plan-template dispatch later matches on.
    pub description: String,
    /// Coarse category.
    pub kind: GoalKind,
    /// Arbitration weight, in `[0, 1]`.
    pub priority: f64,
    /// Current lifecycle state.
    pub status: GoalStatus,
    /// Free-text condition under which this goal counts as achieved.
    pub success_condition: String,
    /// Absolute game time this goal must be resolved by, if any.
    pub deadline: Option<f64>,
    /// What motivated this goal (need kind name, drive name, ...).
    pub motivated_by: Vec<String>,
    /// Parent goal, if this is a subgoal.
    pub parent_id: Option<GoalId>,
    /// Children of this goal.
    pub subgoal_ids: Vec<GoalId>,
    /// Absolute game time this goal was created.
    pub created_at: f64,
    /// Absolute game time this goal became ACTIVE, if ever.
    pub started_at: Option<f64>,
    /// Absolute game time this goal left the open states, if ever.
    pub completed_at: Option<f64>,
    /// Fraction of progress toward completion, in `[0, 1]`.
    pub progress: f64,
}

impl Goal {
    /// Construct a new, PENDING goal.
    #[must_use]
    pub fn new(
        description: impl Into<String>,
        kind: GoalKind,
        priority: f64,
        success_condition: impl Into<String>,
        motivated_by: Vec<String>,
        now: f64,
    ) -> Self {
        Self {
            goal_id: GoalId::new(),
            description: description.into(),
            kind,
            priority: priority.clamp(0.0, 1.0),
            status: GoalStatus::Pending,
            success_condition: success_condition.into(),
            deadline: None,
            motivated_by,
            parent_id: None,
            subgoal_ids: Vec::new(),
            created_at: now,
            started_at: None,
            completed_at: None,
            progress: 0.0,
        }
    }

    /// Urgency exerted by this goal right now: `max(priority, deadline_factor)`,
    /// where `deadline_factor = 1 - time_left/24h` once `time_left < 24h`,
    /// clamped to `[0, 1]` so an overdue deadline saturates at `1.0`.
    #[must_use]
    pub fn urgency(&self, now: f64) -> f64 {
        let deadline_factor = self.deadline.map_or(0.0, |deadline| {
            let time_left = deadline - now;
            if time_left < 24.0 {
                (1.0 - time_left / 24.0).clamp(0.0, 1.0)
            } else {
                0.0
            }
        });
        self.priority.max(deadline_factor).clamp(0.0, 1.0)
    }
}

/// An ordered, cursor-driven sequence of actions bound to one goal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Plan {
    /// Stable identifier.
    pub plan_id: PlanId,
    /// The goal this plan serves.
    pub goal_id: GoalId,
    /// The ordered action sequence.
    pub actions: Vec<Action>,
    /// Absolute game time this plan was formed.
    pub created_at: f64,
    /// Subjective confidence this plan will succeed, in `[0, 1]`.
    pub confidence: f64,
    /// Index of the next action to emit.
    pub cursor: usize,
    /// Whether this plan is currently being executed.
    pub executing: bool,
}

impl Plan {
    /// Construct a plan over `actions`, marked executing immediately.
    #[must_use]
    pub fn new(goal_id: GoalId, actions: Vec<Action>, confidence: f64, now: f64) -> Self {
        Self {
            plan_id: PlanId::new(),
            goal_id,
            actions,
            created_at: now,
            confidence: confidence.clamp(0.0, 1.0),
            cursor: 0,
            executing: true,
        }
    }

    /// Whether every action in this plan has been emitted.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.cursor >= self.actions.len()
    }

    /// The next action to emit, advancing the cursor. Returns `None` once
    /// the plan is complete.
    pub fn advance(&mut self) -> Option<Action> {
        let action = self.actions.get(self.cursor).cloned();
        if action.is_some() {
            self.cursor += 1;
        }
        action
    }
}

/// Read-only counts over a [`GoalHierarchy`], grounded on
/// `goals.py::GoalHierarchy.get_goal_summary`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GoalSummary {
    /// Count of goals per status.
    pub by_status: BTreeMap<String, usize>,
    /// The currently active goal, if any.
    pub active_goal: Option<GoalId>,
    /// The currently active plan, if any.
    pub active_plan: Option<PlanId>,
}

/// Owns an agent's goal tree plus the single active goal/plan pair.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GoalHierarchy {
    goals: BTreeMap<GoalId, Goal>,
    active_goal: Option<GoalId>,
    active_plan: Option<Plan>,
}

impl GoalHierarchy {
    /// An empty hierarchy.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a new goal and return its id.
    pub fn add_goal(&mut self, goal: Goal) -> GoalId {
        let goal_id = goal.goal_id;
        self.goals.insert(goal_id, goal);
        goal_id
    }

    /// Look up a goal by id.
    #[must_use]
    pub fn get(&self, goal_id: GoalId) -> Option<&Goal> {
        self.goals.get(&goal_id)
    }

    /// Mutable lookup of a goal by id.
    pub fn get_mut(&mut self, goal_id: GoalId) -> Option<&mut Goal> {
        self.goals.get_mut(&goal_id)
    }

    /// All goals whose status is open (PENDING, ACTIVE, or BLOCKED).
    pub fn open_goals(&self) -> impl Iterator<Item = &Goal> {
        self.goals.values().filter(|goal| goal.status.is_open())
    }

    /// The first open goal whose description contains `needle` as a
    /// case-insensitive substring, implementing the §A.9 (i) dedup rule:
    /// goal creation is checked against open goals only.
    #[must_use]
    pub fn find_open_similar(&self, needle: &str) -> Option<&Goal> {
        let needle = needle.to_lowercase();
        self.open_goals().find(|goal| goal.description.to_lowercase().contains(&needle))
    }

    /// The currently active goal, if any.
    #[must_use]
    pub fn active_goal(&self) -> Option<&Goal> {
        self.active_goal.and_then(|id| self.goals.get(&id))
    }

    /// The currently active plan, if any.
    #[must_use]
    pub fn active_plan(&self) -> Option<&Plan> {
        self.active_plan.as_ref()
    }

    /// Mutable access to the currently active plan, if any.
    pub fn active_plan_mut(&mut self) -> Option<&mut Plan> {
        self.active_plan.as_mut()
    }

    /// PENDING -> ACTIVE.
    pub fn activate(&mut self, goal_id: GoalId, now: f64) {
        if let Some(goal) = self.goals.get_mut(&goal_id) {
            if goal.status == GoalStatus::Pending || goal.status == GoalStatus::Blocked {
                goal.status = GoalStatus::Active;
                goal.started_at.get_or_insert(now);
            }
        }
        self.active_goal = Some(goal_id);
    }

    /// ACTIVE -> ACHIEVED, setting `progress = 1.0`. Also clears
    /// `active_goal`/`active_plan` if this was the active goal (§A.4.6's
    /// plan-completion coupling).
    pub fn complete(&mut self, goal_id: GoalId, now: f64) {
        if let Some(goal) = self.goals.get_mut(&goal_id) {
            goal.status = GoalStatus::Achieved;
            goal.progress = 1.0;
            goal.completed_at = Some(now);
        }
        if self.active_goal == Some(goal_id) {
            self.active_goal = None;
            self.active_plan = None;
        }
    }

    /// ACTIVE -> FAILED.
    pub fn fail(&mut self, goal_id: GoalId, now: f64) {
        if let Some(goal) = self.goals.get_mut(&goal_id) {
            goal.status = GoalStatus::Failed;
            goal.completed_at = Some(now);
        }
        if self.active_goal == Some(goal_id) {
            self.active_goal = None;
            self.active_plan = None;
        }
    }

    /// ACTIVE -> ABANDONED; clears `active_plan` but leaves history intact.
    /// Returns `false` if the goal is unknown (host-facing no-op per §A.7's
    /// `UnknownReference`).
    pub fn abandon(&mut self, goal_id: GoalId, now: f64) -> bool {
        let Some(goal) = self.goals.get_mut(&goal_id) else {
            return false;
        };
        goal.status = GoalStatus::Abandoned;
        goal.completed_at = Some(now);
        if self.active_goal == Some(goal_id) {
            self.active_goal = None;
            self.active_plan = None;
        }
        true
    }

    /// ACTIVE -> BLOCKED (reversible: a later `activate` restores ACTIVE).
    pub fn block(&mut self, goal_id: GoalId) {
        if let Some(goal) = self.goals.get_mut(&goal_id) {
            if goal.status == GoalStatus::Active {
                goal.status = GoalStatus::Blocked;
            }
        }
    }

    /// Select the next goal to pursue: argmax urgency over open goals,
    /// ties broken by earlier `created_at` (§A.4.1 step 5, S5).
    #[must_use]
    pub fn select_goal(&self, now: f64) -> Option<GoalId> {
        self.open_goals()
            .max_by(|a, b| {
                a.urgency(now)
                    .total_cmp(&b.urgency(now))
                    .then_with(|| b.created_at.total_cmp(&a.created_at))
            })
            .map(|goal| goal.goal_id)
    }

    /// Bind `plan` as the active plan, replacing any previous one.
    pub fn set_active_plan(&mut self, plan: Plan) {
        self.active_plan = Some(plan);
    }

    /// Summary counts by status plus the active goal/plan ids.
    #[must_use]
    pub fn summary(&self) -> GoalSummary {
        let mut by_status = BTreeMap::new();
        for goal in self.goals.values() {
            *by_status.entry(format!("{:?}", goal.status)).or_insert(0) += 1;
        }
        GoalSummary {
            by_status,
            active_goal: self.active_goal,
            active_plan: self.active_plan.as_ref().map(|plan| plan.plan_id),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn s5_tie_break_prefers_earlier_created_goal() {
        let mut hierarchy = GoalHierarchy::new();
        let mut first = Goal::new("g1", GoalKind::Achievement, 0.4, "done", vec![], 1.0);
        first.status = GoalStatus::Active;
        let first_id = first.goal_id;
        hierarchy.add_goal(first);

        let mut second = Goal::new("g2", GoalKind::Achievement, 0.4, "done", vec![], 2.0);
        second.status = GoalStatus::Active;
        hierarchy.add_goal(second);

        assert_eq!(hierarchy.select_goal(10.0), Some(first_id));
    }

    #[test]
    fn overdue_deadline_saturates_urgency_at_one() {
        let mut goal = Goal::new("g", GoalKind::Survival, 0.1, "done", vec![], 0.0);
        goal.deadline = Some(5.0);
        assert!((goal.urgency(10.0) - 1.0).abs() < 1e-9);
    }

    #[test]
    fn dedup_checks_open_goals_only() {
        let mut hierarchy = GoalHierarchy::new();
        let closed = Goal::new("find food", GoalKind::Survival, 0.5, "ate", vec![], 0.0);
        let closed_id = hierarchy.add_goal(closed);
        hierarchy.fail(closed_id, 1.0);
        assert!(hierarchy.find_open_similar("food").is_none());
    }

    #[test]
    fn complete_clears_active_goal_and_plan() {
        let mut hierarchy = GoalHierarchy::new();
        let goal = Goal::new("g", GoalKind::Achievement, 0.5, "done", vec![], 0.0);
        let goal_id = hierarchy.add_goal(goal);
        hierarchy.activate(goal_id, 0.0);
        hierarchy.set_active_plan(Plan::new(goal_id, vec![], 0.7, 0.0));
        hierarchy.complete(goal_id, 1.0);
        assert!(hierarchy.active_goal().is_none());
        assert!(hierarchy.active_plan().is_none());
        assert_eq!(hierarchy.get(goal_id).expect("goal exists").status, GoalStatus::Achieved);
    }

    #[test]
    fn abandon_unknown_goal_is_a_no_op() {
        let mut hierarchy = GoalHierarchy::new();
        assert!(!hierarchy.abandon(GoalId::new(), 0.0));
    }

    #[test]
    fn plan_advance_tracks_cursor_to_completion() {
        let mut plan = Plan::new(
            GoalId::new(),
            vec![Action::simple("look", "look around")],
            0.7,
            0.0,
        );
        assert!(!plan.is_complete());
        let action = plan.advance().expect("one action");
        assert_eq!(action.command, "look");
        assert!(plan.is_complete());
        assert!(plan.advance().is_none());
    }

    #[test]
    fn summary_counts_by_status() {
        let mut hierarchy = GoalHierarchy::new();
        let goal = Goal::new("g", GoalKind::Achievement, 0.5, "done", vec![], 0.0);
        hierarchy.add_goal(goal);
        let summary = hierarchy.summary();
        assert_eq!(summary.by_status.get("Pending").copied(), Some(1));
    }
}
