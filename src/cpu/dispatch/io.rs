use super::{Context, Flow};

/// IN/OUT only exist when the host supplied a port handler.
pub(super) fn execute(opcode: u8, cx: &mut Context) -> Flow {
    let port = cx.imm8();
    let Some(ports) = cx.hooks.ports.as_deref_mut() else {
        return Flow::Unimplemented;
    };
    match opcode {
        // OUT
        0xd3 => {
            ports.write_port(port, cx.state.a);
            Flow::Next(1)
        }
        // IN
        0xdb => {
            cx.state.a = ports.read_port(port);
            Flow::Next(1)
        }
        _ => Flow::Unimplemented,
    }
}
