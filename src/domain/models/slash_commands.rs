#[cfg(test)]
#[path = "slash_commands_test.rs"]
mod tests;

pub struct SlashCommand {
    command: String,
    pub args: Vec<String>,
}

impl SlashCommand {
    pub fn parse(text: &str) -> Option<SlashCommand> {
        let mut args = text
            .trim()
            .split(' ')
            .filter(|e| return !e.is_empty())
            .map(|e| return e.to_string())
            .collect::<Vec<String>>();
        if args.is_empty() {
            return None;
        }
        let prefix = args.remove(0);

        let cmd = SlashCommand {
            command: prefix,
            args,
        };
        if cmd.is_quit()
            || cmd.is_clear()
            || cmd.is_help()
            || cmd.is_sound()
            || cmd.is_theme()
        {
            return Some(cmd);
        }

        return None;
    }

    pub fn is_quit(&self) -> bool {
        return ["/q", "/quit", "/exit"].contains(&self.command.as_str());
    }

    pub fn is_clear(&self) -> bool {
        return ["/c", "/clear"].contains(&self.command.as_str());
    }

    pub fn is_help(&self) -> bool {
        return ["/h", "/help"].contains(&self.command.as_str());
    }

    pub fn is_sound(&self) -> bool {
        return self.command == "/sound";
    }

    pub fn is_theme(&self) -> bool {
        return self.command == "/theme";
    }
}
