use workout_tracker_lib::{Workout, WorkoutKind};
use yew::prelude::*;

#[derive(PartialEq, Properties, Clone)]
pub struct ListProps {
    pub workouts: Vec<Workout>,
    pub on_select: Callback<String>,
    pub on_reset: Callback<()>,
}

#[function_component]
pub fn WorkoutList(props: &ListProps) -> Html {
    let on_reset = props.on_reset.clone();
    let reset = Callback::from(move |_: MouseEvent| on_reset.emit(()));

    html! {
        <>
            <ul class="workouts">
                { for props.workouts.iter().map(|workout| entry(workout, &props.on_select)) }
            </ul>
            if !props.workouts.is_empty() {
                <button class="workouts__reset" onclick={reset}>{"Delete all workouts"}</button>
            }
        </>
    }
}

fn entry(workout: &Workout, on_select: &Callback<String>) -> Html {
    let id = workout.id.clone();
    let on_select = on_select.clone();
    let onclick = Callback::from(move |_: MouseEvent| on_select.emit(id.clone()));

    let workout_type = workout.workout_type();
    let specific = match workout.kind {
        WorkoutKind::Running { cadence, pace } => html! { <>
            {detail("⚡️", format!("{pace:.1}"), "min/km")}
            {detail("🦶🏼", format!("{cadence}"), "spm")}
        </> },
        WorkoutKind::Cycling { elevation_gain, speed } => html! { <>
            {detail("⚡️", format!("{speed:.1}"), "km/h")}
            {detail("⛰", format!("{elevation_gain}"), "m")}
        </> },
    };

    html! {
        <li key={workout.id.clone()} class={format!("workout workout--{}", workout_type)} data-id={workout.id.clone()} {onclick}>
            <h2 class="workout__title">{workout.description.clone()}</h2>
            {detail(workout_type.emoji(), format!("{}", workout.distance), "km")}
            {detail("⏱", format!("{}", workout.duration), "min")}
            {specific}
        </li>
    }
}

fn detail(icon: &'static str, value: String, unit: &'static str) -> Html {
    html! {
        <div class="workout__details">
            <span class="workout__icon">{icon}</span>
            <span class="workout__value">{value}</span>
            <span class="workout__unit">{unit}</span>
        </div>
    }
}
