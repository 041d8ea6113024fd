use bevy::prelude::*;
use bevy::app::AppExit;
use bevy::log::LogPlugin;
use bevy::math::primitives::Circle;
use bevy::sprite::{MaterialMesh2dBundle, Mesh2dHandle};
use bevy::window::PrimaryWindow;

use crate::simulation::scenario::Simulation;
use crate::simulation::states::{BodyColor, NVec2};
use crate::visualization::canvas::{Canvas, RecordingCanvas, Viewport};
use crate::visualization::driver::Animation;
use crate::visualization::projector::RenderStyle;

/// Opacity of the flat halo standing in for a canvas shadow blur
const HALO_ALPHA: f32 = 0.35;

/// Used only if the primary window is not there at startup
const FALLBACK_VIEWPORT: (f64, f64) = (1280.0, 720.0);

/// Simulation waiting for the window so the camera can be fitted to it
#[derive(Resource)]
struct Pending(Option<(Simulation, RenderStyle)>);

/// The surface the animation draws into each frame
#[derive(Resource)]
struct FrameCanvas(RecordingCanvas);

#[derive(Component)]
struct DiscSlot(usize);

#[derive(Component)]
struct HaloSlot(usize);

#[derive(Component)]
struct ResetButton;

pub fn run_2d(simulation: Simulation, style: RenderStyle) {
    log::info!("run_2d: starting bevy 2D viewer with {} bodies", simulation.bodies().len());

    let [r, g, b] = style.background.to_unit();

    App::new()
        .insert_resource(ClearColor(Color::srgb(r, g, b)))
        .insert_resource(Pending(Some((simulation, style))))
        .add_plugins(
            DefaultPlugins
                .set(WindowPlugin {
                    primary_window: Some(Window {
                        title: "Three-Body Simulation".into(),
                        ..default()
                    }),
                    ..default()
                })
                // env_logger already owns the global logger
                .disable::<LogPlugin>(),
        )
        .add_systems(Startup, setup_system)
        .add_systems(Update, (input_system, frame_system, sync_discs_system).chain())
        .run();
}

fn window_viewport(window: &Window) -> Viewport {
    Viewport::new(window.width() as f64, window.height() as f64)
}

fn setup_system(
    mut commands: Commands,
    mut pending: ResMut<Pending>,
    windows: Query<&Window, With<PrimaryWindow>>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<ColorMaterial>>,
) {
    let Some((simulation, style)) = pending.0.take() else {
        return;
    };

    let viewport = match windows.get_single() {
        Ok(window) => window_viewport(window),
        Err(_) => {
            log::warn!("no primary window at startup, fitting camera to {:?}", FALLBACK_VIEWPORT);
            Viewport::new(FALLBACK_VIEWPORT.0, FALLBACK_VIEWPORT.1)
        }
    };

    commands.spawn(Camera2dBundle::default());

    // one halo + disc pair per body, scaled from a unit circle every frame
    let unit_circle = Mesh2dHandle(meshes.add(Circle::new(1.0)));
    for i in 0..simulation.bodies().len() {
        commands.spawn((
            MaterialMesh2dBundle {
                mesh: unit_circle.clone(),
                material: materials.add(ColorMaterial::from(Color::WHITE)),
                visibility: Visibility::Hidden,
                ..Default::default()
            },
            HaloSlot(i),
        ));
        commands.spawn((
            MaterialMesh2dBundle {
                mesh: unit_circle.clone(),
                material: materials.add(ColorMaterial::from(Color::WHITE)),
                visibility: Visibility::Hidden,
                ..Default::default()
            },
            DiscSlot(i),
        ));
    }

    spawn_overlay(&mut commands);

    commands.insert_resource(FrameCanvas(RecordingCanvas::new(viewport)));
    commands.insert_resource(Animation::start(simulation, viewport, style));
}

fn spawn_overlay(commands: &mut Commands) {
    commands
        .spawn(NodeBundle {
            style: Style {
                position_type: PositionType::Absolute,
                top: Val::Px(24.0),
                width: Val::Percent(100.0),
                flex_direction: FlexDirection::Column,
                align_items: AlignItems::Center,
                ..default()
            },
            ..default()
        })
        .with_children(|parent| {
            parent.spawn(TextBundle::from_section(
                "Three-Body Simulation",
                TextStyle {
                    font_size: 32.0,
                    color: Color::WHITE,
                    ..default()
                },
            ));
            parent.spawn(TextBundle::from_section(
                "Three equal masses on the figure-eight periodic orbit",
                TextStyle {
                    font_size: 16.0,
                    color: Color::srgb(0.8, 0.8, 0.8),
                    ..default()
                },
            ));
        });

    commands
        .spawn((
            ButtonBundle {
                style: Style {
                    position_type: PositionType::Absolute,
                    top: Val::Px(24.0),
                    right: Val::Px(32.0),
                    padding: UiRect::axes(Val::Px(28.0), Val::Px(10.0)),
                    border: UiRect::all(Val::Px(1.0)),
                    ..default()
                },
                background_color: BackgroundColor(Color::srgba(0.13, 0.13, 0.13, 0.85)),
                border_color: BorderColor(Color::srgb(0.33, 0.33, 0.33)),
                ..default()
            },
            ResetButton,
        ))
        .with_children(|parent| {
            parent.spawn(TextBundle::from_section(
                "Reset Simulation",
                TextStyle {
                    font_size: 18.0,
                    color: Color::WHITE,
                    ..default()
                },
            ));
        });
}

fn input_system(
    keys: Res<ButtonInput<KeyCode>>,
    buttons: Query<&Interaction, (Changed<Interaction>, With<ResetButton>)>,
    mut animation: ResMut<Animation>,
    mut exit: EventWriter<AppExit>,
) {
    let clicked = buttons.iter().any(|i| *i == Interaction::Pressed);
    if clicked || keys.just_pressed(KeyCode::KeyR) {
        animation.reset();
    }

    if keys.just_pressed(KeyCode::Escape) {
        animation.cancel();
        exit.send(AppExit::Success);
    }
}

fn frame_system(
    mut animation: ResMut<Animation>,
    mut canvas: ResMut<FrameCanvas>,
    windows: Query<&Window, With<PrimaryWindow>>,
) {
    // the canvas follows the window, the camera does not
    let surface: Option<&mut dyn Canvas> = match windows.get_single() {
        Ok(window) => {
            canvas.0.resize(window_viewport(window));
            Some(&mut canvas.0)
        }
        Err(_) => None,
    };

    animation.frame(surface);
}

fn sync_discs_system(
    canvas: Res<FrameCanvas>,
    mut materials: ResMut<Assets<ColorMaterial>>,
    mut discs: Query<(&DiscSlot, &mut Transform, &mut Visibility, &Handle<ColorMaterial>), Without<HaloSlot>>,
    mut halos: Query<(&HaloSlot, &mut Transform, &mut Visibility, &Handle<ColorMaterial>), Without<DiscSlot>>,
) {
    if !canvas.is_changed() {
        return;
    }

    let viewport = canvas.0.viewport();
    let drawn = canvas.0.discs();

    // later bodies paint over earlier ones, halos included
    for (DiscSlot(i), mut transform, mut visibility, material) in &mut discs {
        match drawn.get(*i) {
            Some(disc) => {
                place(&mut transform, viewport, disc.center, disc.radius, (2 * i + 1) as f32);
                paint(&mut materials, material, disc.color, 1.0);
                *visibility = Visibility::Visible;
            }
            None => *visibility = Visibility::Hidden,
        }
    }

    for (HaloSlot(i), mut transform, mut visibility, material) in &mut halos {
        match drawn.get(*i).and_then(|d| d.glow.map(|glow| (d, glow))) {
            Some((disc, (color, blur))) if blur > 0.0 => {
                place(&mut transform, viewport, disc.center, disc.radius + blur, (2 * i) as f32);
                paint(&mut materials, material, color, HALO_ALPHA);
                *visibility = Visibility::Visible;
            }
            _ => *visibility = Visibility::Hidden,
        }
    }
}

/// Canvas pixels (top-left origin, y down) to bevy world units (centered, y up)
fn place(transform: &mut Transform, viewport: Viewport, center: NVec2, radius: f64, z: f32) {
    transform.translation = Vec3::new(
        (center.x - viewport.width / 2.0) as f32,
        (viewport.height / 2.0 - center.y) as f32,
        z,
    );
    transform.scale = Vec3::splat(radius as f32);
}

fn paint(materials: &mut Assets<ColorMaterial>, handle: &Handle<ColorMaterial>, color: BodyColor, alpha: f32) {
    let [r, g, b] = color.to_unit();
    let wanted = Color::srgba(r, g, b, alpha);
    if materials.get(handle).map(|m| m.color) != Some(wanted) {
        if let Some(material) = materials.get_mut(handle) {
            material.color = wanted;
        }
    }
}
