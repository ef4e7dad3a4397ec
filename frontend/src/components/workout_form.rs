use web_sys::{HtmlInputElement, HtmlSelectElement};
use workout_tracker_lib::{FormField, WorkoutForm, WorkoutType};
use yew::prelude::*;

#[derive(PartialEq, Properties, Clone)]
pub struct FormProps {
    pub form: WorkoutForm,
    pub visible: bool,
    /// Set right after a submission, while the form must not reappear.
    pub hiding: bool,
    pub distance_ref: NodeRef,
    pub on_type: Callback<String>,
    pub on_input: Callback<(FormField, String)>,
    pub on_submit: Callback<()>,
}

#[function_component]
pub fn WorkoutFormComponent(props: &FormProps) -> Html {
    let on_type = props.on_type.clone();
    let onchange = Callback::from(move |e: Event| {
        let select: HtmlSelectElement = e.target_unchecked_into();
        on_type.emit(select.value());
    });

    let on_submit = props.on_submit.clone();
    let onsubmit = Callback::from(move |e: SubmitEvent| {
        e.prevent_default();
        on_submit.emit(());
    });

    let workout_type = props.form.selected_type();
    let running = workout_type == WorkoutType::Running;

    let class = classes!("form", (!props.visible).then_some("hidden"));
    let style = if props.hiding { "display: none" } else { "" };

    html! {
        <form {class} {style} {onsubmit}>
            <div class="form__row">
                <label class="form__label">{"Type"}</label>
                <select class="form__input form__input--type" {onchange}>
                    <option value="running" selected={running}>{"Running"}</option>
                    <option value="cycling" selected={!running}>{"Cycling"}</option>
                </select>
            </div>
            {number_input("Distance", "km", &props.form.distance, FormField::Distance, true, &props.on_input, props.distance_ref.clone())}
            {number_input("Duration", "min", &props.form.duration, FormField::Duration, true, &props.on_input, NodeRef::default())}
            {number_input("Cadence", "step/min", &props.form.cadence, FormField::Cadence, running, &props.on_input, NodeRef::default())}
            {number_input("Elev Gain", "meters", &props.form.elevation_gain, FormField::ElevationGain, !running, &props.on_input, NodeRef::default())}
            <button class="form__btn">{"OK"}</button>
        </form>
    }
}

fn number_input(
    label: &'static str,
    placeholder: &'static str,
    value: &str,
    field: FormField,
    shown: bool,
    on_input: &Callback<(FormField, String)>,
    node_ref: NodeRef,
) -> Html {
    let on_input = on_input.clone();
    let oninput = Callback::from(move |e: InputEvent| {
        let input: HtmlInputElement = e.target_unchecked_into();
        on_input.emit((field, input.value()));
    });

    html! {
        <div class={classes!("form__row", (!shown).then_some("form__row--hidden"))}>
            <label class="form__label">{label}</label>
            <input
                class="form__input"
                ref={node_ref}
                {placeholder}
                value={value.to_owned()}
                {oninput}
            />
        </div>
    }
}
