//! Small display widgets shared by list and detail pages.

use leptos::prelude::*;

use crate::models::{Priority, ProjectStatus, TaskStatus};

/// Circumference of the ring (r = 26)
const RING_LENGTH: f64 = 163.36;

#[component]
pub fn ProgressRing(percent: u32) -> impl IntoView {
    let offset = RING_LENGTH - RING_LENGTH * f64::from(percent.min(100)) / 100.0;
    view! {
        <div class="progress-circle">
            <svg class="progress-ring" width="60" height="60">
                <circle class="progress-ring-track" stroke-width="4" fill="transparent" r="26" cx="30" cy="30" />
                <circle
                    class="progress-ring-fill"
                    stroke-width="4"
                    fill="transparent"
                    r="26"
                    cx="30"
                    cy="30"
                    stroke-dasharray=RING_LENGTH.to_string()
                    stroke-dashoffset=format!("{:.2}", offset)
                />
            </svg>
            <span class="progress-text">{format!("{}%", percent)}</span>
        </div>
    }
}

#[component]
pub fn PriorityBadge(priority: Option<Priority>) -> impl IntoView {
    priority.map(|p| {
        view! { <span class=format!("priority-badge priority-{}", p.as_str())>{p.label()}</span> }
    })
}

#[component]
pub fn ProjectStatusBadge(status: Option<ProjectStatus>) -> impl IntoView {
    status.map(|s| view! { <span class=format!("badge badge-{}", s.as_str())>{s.label()}</span> })
}

#[component]
pub fn TaskStatusBadge(status: TaskStatus) -> impl IntoView {
    view! {
        <span class=format!("status-badge status-{}", status.as_str())>
            <span class="material-icons">{status.icon()}</span>
            {status.label()}
        </span>
    }
}
