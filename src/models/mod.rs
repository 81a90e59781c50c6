// SPDX-License-Identifier: MIT

//! Data models for the application.

pub mod exercise;
pub mod membership;
pub mod stats;
pub mod user;
pub mod workout;

pub use exercise::{Exercise, NewExercise};
pub use membership::{Membership, NewMembership};
pub use stats::DashboardStats;
pub use user::{NewUser, User, UserProfile};
pub use workout::{NewWorkout, NewWorkoutEntry, Workout, WorkoutChanges, WorkoutEntry};
