use bevy::prelude::*;
use bevy::window::WindowCloseRequested;

/// Closing either window ends the process.
pub fn exit_on_close_request(
    mut requests: MessageReader<WindowCloseRequested>,
    mut exit: MessageWriter<AppExit>,
) {
    let Some(request) = requests.read().last() else {
        return;
    };

    info!("window {} requested close, exiting", request.window);
    exit.write(AppExit::Success);
}
