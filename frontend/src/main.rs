use components::{
    map_component::LeafletMap,
    workout_form::WorkoutFormComponent,
    workout_list::WorkoutList,
};
use gloo_console::{error, info};
use gloo_timers::callback::Timeout;
use storage::LocalStore;
use web_sys::HtmlInputElement;
use workout_tracker_lib::{Controller, Coords, FormField, TrackerConfig};
use yew::prelude::*;

mod components;
mod geolocation;
mod storage;
mod util;

enum MainMsg {
    Position(Coords),
    PositionFailed(String),
    MapClicked(Coords),
    TypeSelected(String),
    FieldChanged(FormField, String),
    Submit,
    FormRedisplay,
    WorkoutSelected(String),
    Reset,
}

struct Model {
    controller: Option<Controller<LeafletMap, LocalStore>>,
    distance_ref: NodeRef,
    form_hiding: bool,
    focus_distance: bool,
    redisplay_timeout: Option<Timeout>,
}

impl Component for Model {
    type Message = MainMsg;
    type Properties = ();

    fn create(ctx: &Context<Self>) -> Self {
        let link = ctx.link().clone();
        let config = TrackerConfig::default();

        let controller = match LeafletMap::new(&config) {
            Ok(map) => {
                map.on_click(link.callback(MainMsg::MapClicked));
                let controller = Controller::new(map, LocalStore::new(), config);
                info!(format!("Loaded {} workouts", controller.workouts().len()));
                Some(controller)
            }
            Err(err) => {
                error!("Failed to create map", err);
                None
            }
        };

        geolocation::request_position(link.callback(MainMsg::Position), link.callback(MainMsg::PositionFailed));

        Self {
            controller,
            distance_ref: NodeRef::default(),
            form_hiding: false,
            focus_distance: false,
            redisplay_timeout: None,
        }
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        let Some(controller) = self.controller.as_mut() else {
            return false;
        };

        match msg {
            MainMsg::Position(coords) => {
                controller.on_position(coords);
            }
            MainMsg::PositionFailed(reason) => {
                let err = controller.on_position_error(reason);
                util::alert(&err.to_string());
                return false;
            }
            MainMsg::MapClicked(coords) => match controller.on_map_click(coords) {
                Ok(()) => self.focus_distance = true,
                Err(err) => {
                    util::alert(&err.to_string());
                    return false;
                }
            },
            MainMsg::TypeSelected(workout_type) => controller.select_type(&workout_type),
            MainMsg::FieldChanged(field, value) => controller.update_field(field, value),
            MainMsg::Submit => {
                let result = controller.submit().map(|workout| workout.description.clone());
                let delay = controller.config().form_redisplay_delay_ms;
                match result {
                    Ok(description) => {
                        info!(format!("Added workout: {}", description));
                        self.form_hiding = true;
                        let link = ctx.link().clone();
                        self.redisplay_timeout = Some(Timeout::new(delay, move || link.send_message(MainMsg::FormRedisplay)));
                    }
                    Err(err) => util::alert(&err.to_string()),
                }
            }
            MainMsg::FormRedisplay => {
                self.form_hiding = false;
                self.redisplay_timeout = None;
            }
            MainMsg::WorkoutSelected(id) => {
                if let Err(err) = controller.focus_workout(&id) {
                    util::alert(&err.to_string());
                }
                return false;
            }
            MainMsg::Reset => {
                let window = gloo_utils::window();
                if !window.confirm_with_message("Delete all workouts?").unwrap_or(false) {
                    return false;
                }
                if let Err(err) = controller.reset() {
                    util::alert(&err.to_string());
                    return false;
                }
                if let Err(err) = window.location().reload() {
                    error!("Failed to reload", err);
                }
            }
        }
        true
    }

    fn rendered(&mut self, _ctx: &Context<Self>, first_render: bool) {
        if first_render {
            if let Some(controller) = &self.controller {
                controller.map().invalidate_size();
            }
        }

        if self.focus_distance {
            self.focus_distance = false;
            if let Some(input) = self.distance_ref.cast::<HtmlInputElement>() {
                let _ = input.focus();
            }
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let Some(controller) = &self.controller else {
            return html! { <div class="error">{"Could not create the map."}</div> };
        };
        let link = ctx.link();

        html! { <>
            <div class="sidebar">
                <WorkoutFormComponent
                    form={controller.form().clone()}
                    visible={controller.is_form_visible()}
                    hiding={self.form_hiding}
                    distance_ref={self.distance_ref.clone()}
                    on_type={link.callback(MainMsg::TypeSelected)}
                    on_input={link.callback(|(field, value): (FormField, String)| MainMsg::FieldChanged(field, value))}
                    on_submit={link.callback(|_: ()| MainMsg::Submit)}
                />
                <WorkoutList
                    workouts={controller.workouts().to_vec()}
                    on_select={link.callback(MainMsg::WorkoutSelected)}
                    on_reset={link.callback(|_: ()| MainMsg::Reset)}
                />
            </div>
            {controller.map().render()}
        </> }
    }
}

fn main() {
    yew::Renderer::<Model>::new().render();
}
