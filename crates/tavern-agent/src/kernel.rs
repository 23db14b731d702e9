//! The agent cognitive cycle: `step`.
//!
//! Implements §A.4.1's seven-step cycle over an [`Agent`]: time
//! integration, perception, appraisal, goal maintenance, goal selection,
//! plan maintenance, and execution. Deterministic given the agent's state
//! and the [`WorldSnapshot`] passed in -- no randomness, no suspension
//! points, matching §A.5.

use tavern_types::{
    Action, BeliefKind, GoalKind, PerceptionKind, TelemetryChannel, TelemetryKind, WorldSnapshot,
};

use crate::agent::Agent;
use crate::beliefs::Belief;
use crate::emotions::Outcome;
use crate::goals::{Goal, Plan};
use crate::memory::Memory;

/// A single perception extracted from a [`WorldSnapshot`] during step 2.
#[derive(Debug, Clone, PartialEq)]
struct Perception {
    kind: PerceptionKind,
    payload: String,
}

/// Run one full cognitive cycle for `agent` and return the action it wants
/// to take this tick, if any.
///
/// Per §A.4.1's contract the return type is `Option<Action>`; in practice
/// every reachable path (plan execution, idle fallback, even starvation)
/// produces `Some`, but the type stays optional so a host never needs to
/// special-case an impossible variant.
pub fn step(agent: &mut Agent, snapshot: &WorldSnapshot, telemetry: &TelemetryChannel) -> Option<Action> {
    integrate_time(agent, snapshot.dt_hours);
    let perceptions = perceive(agent, snapshot);
    integrate_perceptions(agent, &perceptions, snapshot);
    maintain_goals(agent, telemetry);
    select_goal(agent);
    maintain_plan(agent);
    execute(agent, telemetry)
}

/// Step 1: decay needs and emotions, update mood, advance the clock.
fn integrate_time(agent: &mut Agent, dt_hours: f64) {
    let now = agent.game_time + dt_hours;
    agent.needs.update_all(dt_hours, now);
    agent.emotional_state.update(dt_hours);
    agent.game_time = now;
}

/// Step 2: extract tagged perceptions from the snapshot.
fn perceive(agent: &Agent, snapshot: &WorldSnapshot) -> Vec<Perception> {
    let mut perceptions = Vec::new();
    if snapshot.location != agent.location {
        perceptions.push(Perception {
            kind: PerceptionKind::LocationChange,
            payload: snapshot.location.clone(),
        });
    }
    for present in &snapshot.agents_present {
        perceptions.push(Perception {
            kind: PerceptionKind::AgentPresent,
            payload: present.to_string(),
        });
    }
    for event in &snapshot.recent_events {
        perceptions.push(Perception {
            kind: PerceptionKind::Event,
            payload: event.clone(),
        });
    }
    for (item, available) in &snapshot.item_availability {
        perceptions.push(Perception {
            kind: PerceptionKind::ItemAvailability,
            payload: format!("{item}: {available}"),
        });
    }
    perceptions
}

/// Step 3: appraise each perception, writing memory/belief/ToM updates.
/// Unknown perception kinds would simply be ignored -- in practice every
/// variant `perceive` emits is handled here.
fn integrate_perceptions(agent: &mut Agent, perceptions: &[Perception], snapshot: &WorldSnapshot) {
    let now = agent.game_time;
    for perception in perceptions {
        let base_valence = lexical_valence(&perception.payload);
        let valence = agent.emotional_state.mood.influences_perception(base_valence);

        match perception.kind {
            PerceptionKind::Event | PerceptionKind::AgentPresent => {
                let importance = 0.5;
                let intensity = (valence.abs() * 0.5).clamp(0.0, 1.0);
                agent.episodic.add(
                    Memory::new(
                        perception.payload.clone(),
                        now,
                        Some(snapshot.location.clone()),
                        snapshot.agents_present.iter().map(ToString::to_string).collect(),
                        valence,
                        intensity,
                        importance,
                    ),
                    now,
                );
            }
            PerceptionKind::LocationChange => {
                agent.semantic.set(
                    format!("location/{}", perception.payload),
                    format!("was at {} at game time {now:.2}", perception.payload),
                    0.5,
                    now,
                );
            }
            PerceptionKind::ItemAvailability => {}
        }

    }

    for &present in &snapshot.agents_present {
        agent.beliefs.get_theory_of_mind(present);
    }
}

/// A valence-from-keywords heuristic: crude by design (§A.9), but pure and
/// deterministic, which is all the contract requires.
fn lexical_valence(text: &str) -> f64 {
    const POSITIVE: [&str; 10] =
        ["good", "happy", "success", "won", "helped", "gift", "love", "friend", "safe", "thank"];
    const NEGATIVE: [&str; 10] =
        ["bad", "attack", "steal", "danger", "died", "lost", "angry", "hurt", "threat", "fear"];
    let lowered = text.to_lowercase();
    let mut valence = 0.0;
    for word in POSITIVE {
        if lowered.contains(word) {
            valence += 0.3;
        }
    }
    for word in NEGATIVE {
        if lowered.contains(word) {
            valence -= 0.3;
        }
    }
    valence.clamp(-1.0, 1.0)
}

/// The fixed need-kind -> goal-description mapping of step 4. Every
/// description contains one of the plan-template keywords (`food`, `rest`,
/// `connect`/`social`, `explore`/`learn`, `accomplish`/`task`).
fn need_goal_description(kind: tavern_types::NeedKind) -> (&'static str, GoalKind) {
    use tavern_types::NeedKind::{
        Achievement, Autonomy, Belonging, Competence, Curiosity, Health, Hunger, Intimacy,
        Purpose, Respect, Rest, Safety, Thirst,
    };
    match kind {
        Hunger => ("satisfy hunger by getting food", GoalKind::Survival),
        Thirst => ("satisfy thirst by getting food and drink", GoalKind::Survival),
        Rest => ("get some rest", GoalKind::Survival),
        Safety => ("accomplish the task of finding safety", GoalKind::Survival),
        Health => ("accomplish the task of seeking healing", GoalKind::Survival),
        Belonging => ("connect with others to address belonging", GoalKind::Social),
        Achievement => ("accomplish a meaningful task", GoalKind::Achievement),
        Autonomy => ("accomplish something independently", GoalKind::Achievement),
        Competence => ("accomplish a task to build competence", GoalKind::Achievement),
        Curiosity => ("explore and learn something new", GoalKind::Exploration),
        Respect => ("connect with others to earn respect", GoalKind::Social),
        Intimacy => ("connect with someone close", GoalKind::Social),
        Purpose => ("accomplish something that gives purpose", GoalKind::Achievement),
    }
}

/// The fixed drive-name -> goal-description mapping of step 4.
fn drive_goal_description(name: &str) -> Option<(&'static str, GoalKind)> {
    match name {
        "survival" => Some(("find food and rest to survive", GoalKind::Survival)),
        "achievement" => Some(("accomplish a meaningful task", GoalKind::Achievement)),
        "affiliation" => Some(("connect with others", GoalKind::Social)),
        "autonomy" => Some(("accomplish something independently", GoalKind::Achievement)),
        "exploration" => Some(("explore and learn something new", GoalKind::Exploration)),
        "purpose" => Some(("accomplish something that gives purpose", GoalKind::Achievement)),
        _ => None,
    }
}

/// Step 4: ensure a goal exists for every urgent need and every strongly
/// activated drive, deduplicating against open goals and giving need-goals
/// precedence over drive-goals for the same need (§A.9 open question ii).
fn maintain_goals(agent: &mut Agent, telemetry: &TelemetryChannel) {
    let now = agent.game_time;
    let mut urgent_kinds = Vec::new();
    for need in agent.needs.urgent() {
        urgent_kinds.push(need.kind);
        let (description, kind) = need_goal_description(need.kind);
        if agent.goals.find_open_similar(description).is_some() {
            continue;
        }
        let goal = Goal::new(
            description,
            kind,
            need.get_urgency(),
            format!("{} need satisfied", need.kind.as_str()),
            vec![need.kind.as_str().to_string()],
            now,
        );
        agent.goals.add_goal(goal);
    }

    let drives = agent.drives.clone();
    for drive in &drives {
        let activation = drive.get_activation(&agent.needs);
        if activation <= 0.6 {
            continue;
        }
        if drive.satisfies_needs.iter().any(|kind| urgent_kinds.contains(kind)) {
            continue;
        }
        let Some((description, kind)) = drive_goal_description(&drive.name) else {
            continue;
        };
        if agent.goals.find_open_similar(description).is_some() {
            continue;
        }
        let priority = activation * drive.intensity;
        let goal = Goal::new(
            description,
            kind,
            priority,
            format!("{} drive satisfied", drive.name),
            vec![drive.name.clone()],
            now,
        );
        agent.goals.add_goal(goal);
    }

    if urgent_kinds.is_empty() && agent.goals.open_goals().next().is_none() {
        telemetry.record("goals", TelemetryKind::Starvation, "no open goals and no urgent needs");
    }
}

/// Step 5: activate the highest-urgency open goal, if none is already
/// active (or the active one has completed).
fn select_goal(agent: &mut Agent) {
    let needs_selection = agent
        .goals
        .active_goal()
        .is_none_or(|goal| goal.status.is_complete());
    if !needs_selection {
        return;
    }
    let now = agent.game_time;
    if let Some(goal_id) = agent.goals.select_goal(now) {
        agent.goals.activate(goal_id, now);
    }
}

/// Step 6: form a fresh plan for the active goal if it has none, or its
/// plan has run to completion.
fn maintain_plan(agent: &mut Agent) {
    let now = agent.game_time;
    let Some(goal) = agent.goals.active_goal() else {
        return;
    };
    let needs_plan = agent
        .goals
        .active_plan()
        .is_none_or(Plan::is_complete);
    if !needs_plan {
        return;
    }
    let actions = plan_template(&goal.description);
    if actions.is_empty() {
        return;
    }
    let goal_id = goal.goal_id;
    agent.goals.set_active_plan(Plan::new(goal_id, actions, 0.7, now));
}

/// The fixed keyword -> action-template library of step 6.
fn plan_template(description: &str) -> Vec<Action> {
    let lowered = description.to_lowercase();
    if lowered.contains("food") {
        vec![
            Action::simple("status", "check current status"),
            Action::simple("buy bread", "buy bread to satisfy hunger"),
        ]
    } else if lowered.contains("rest") {
        vec![
            Action::simple("look", "look for a place to rest"),
            Action::simple("rest", "rest to recover"),
        ]
    } else if lowered.contains("connect") || lowered.contains("social") {
        vec![
            Action::simple("look", "look for someone to talk to"),
            Action::simple("interact nearby_agent talk", "start a conversation"),
        ]
    } else if lowered.contains("explore") || lowered.contains("learn") {
        vec![
            Action::simple("look", "survey the surroundings"),
            Action::simple("read notice board", "read the notice board for news"),
        ]
    } else if lowered.contains("accomplish") || lowered.contains("task") {
        vec![
            Action::simple("look", "assess the task at hand"),
            Action::simple("work clean_tables", "perform available work"),
        ]
    } else {
        Vec::new()
    }
}

/// Step 7: emit the active plan's next action, completing its goal if that
/// was the last one; otherwise emit a personality-conditioned idle action.
fn execute(agent: &mut Agent, telemetry: &TelemetryChannel) -> Option<Action> {
    let now = agent.game_time;
    if let Some(plan) = agent.goals.active_plan_mut() {
        if let Some(action) = plan.advance() {
            if plan.is_complete() {
                let goal_id = plan.goal_id;
                agent.goals.complete(goal_id, now);
            }
            return Some(action);
        }
    }
    telemetry.record("kernel", TelemetryKind::Starvation, "no executable plan, emitting idle action");
    Some(idle_action(agent))
}

/// Personality-conditioned idle action: extraverted agents look for company,
/// open agents read the notice board, everyone else just looks around.
/// Ties broken lexicographically by command.
fn idle_action(agent: &Agent) -> Action {
    let mut candidates = Vec::new();
    if agent.personality.extraversion > 0.6 {
        candidates.push(Action::simple("look", "look around for someone to talk to"));
    }
    if agent.personality.openness > 0.6 {
        candidates.push(Action::simple("read notice board", "read the notice board"));
    }
    if candidates.is_empty() {
        return Action::simple("look", "look around");
    }
    candidates.sort_by(|a, b| a.command.cmp(&b.command));
    candidates.into_iter().next().unwrap_or_else(|| Action::simple("look", "look around"))
}

/// Integrate an asynchronously-delivered outcome for a previously emitted
/// action (§A.6): writes an episodic memory, triggers appraisal, and
/// absorbs any learned facts into semantic memory.
pub fn integrate_outcome(agent: &mut Agent, outcome: &tavern_types::ActionOutcome) {
    let now = agent.game_time;
    let valence = if outcome.success { 0.5 } else { -0.3 };
    let importance = if outcome.success { 0.6 } else { 0.4 };
    agent.episodic.add(
        Memory::new(outcome.description.clone(), now, None, Vec::new(), valence, 0.4, importance),
        now,
    );

    let relevance = if outcome.success { 0.7 } else { 0.6 };
    let occ_outcome = if outcome.success { Outcome::Positive } else { Outcome::Negative };
    let personality = agent.personality.clone();
    agent.emotional_state.appraise_event(
        occ_outcome,
        0.0,
        relevance,
        move |kind| personality.emotion_multiplier(kind),
        outcome.description.clone(),
        now,
    );

    for fact in &outcome.learned {
        agent.semantic.set(fact.topic.clone(), fact.content.clone(), fact.confidence, now);
        let mut belief = Belief::new(BeliefKind::Fact, fact.topic.clone(), fact.content.clone(), fact.confidence, now);
        belief.update_confidence(true, 0.1, "action outcome", now);
        agent.beliefs.add_belief(belief);
    }
}
